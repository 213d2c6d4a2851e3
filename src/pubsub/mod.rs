//! Подсистема Publish–Subscribe (pub/sub).
//!
//! Лёгкий синхронный pub/sub внутри процесса. Каждая публикация - отдельный
//! изолированный канал без глобального реестра:
//!
//! - `publication`: публикация, её создание, публикация данных и подписка.
//! - `subscriber`: callback подписчика и его диагностическое имя.
//! - `unsubscribe`: идемпотентный дескриптор отписки.
//! - `record`: формат диагностических записей.
//! - `sink`: приёмники записей (`tracing` и память).

mod publication;
pub mod record;
pub mod sink;
pub mod subscriber;
mod unsubscribe;

pub use publication::{
    create_publication, create_publication_with_sink, publish, subscribe, Publication,
    DEFAULT_PUBLICATION_NAME,
};
pub use record::*;
pub use sink::*;
pub use subscriber::*;
pub use unsubscribe::Unsubscribe;
