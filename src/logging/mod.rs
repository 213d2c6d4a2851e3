//! Инициализация глобального `tracing`-подписчика.
//!
//! Библиотека сама подписчика не устанавливает: записи публикаций идут
//! через [`crate::TracingSink`] в тот подписчик, который выбрал
//! пользователь. [`init_logging`] - готовый вариант для приложений и
//! тестов.

pub mod config;
mod filters;
mod formatter;

pub use self::config::{LogFormat, LoggingConfig};
pub use filters::build_filter_from_config;
pub use formatter::build_formatter_from_config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::LoggingError;

/// Инициализация логирования с конфигурацией.
///
/// Переменные `PUSU_LOG_LEVEL`/`PUSU_LOG_FORMAT` перекрывают конфигурацию,
/// а `RUST_LOG` - итоговую директиву фильтра. Повторный вызов возвращает
/// [`LoggingError::AlreadyInitialized`].
pub fn init_logging(mut config: LoggingConfig) -> Result<(), LoggingError> {
    config.apply_env_overrides();

    let env_filter = build_filter_from_config(&config)?;
    let fmt_layer = build_formatter_from_config(&config, std::io::stdout);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        log_format = %config.format,
        "Logging system initialized"
    );

    Ok(())
}
