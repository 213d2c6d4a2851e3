//! `pusu`: минимальный синхронный publish/subscribe внутри процесса.
//!
//! ```
//! use pusu::{create_publication, PublicationConfig};
//!
//! let publication = create_publication::<String>(PublicationConfig::new().with_name("greetings"));
//! let unsubscribe = publication.subscribe(|msg| println!("got {msg}"));
//!
//! publication.publish("hello".to_string());
//! unsubscribe.unsubscribe();
//! ```

/// Publication configuration and loading from env/files.
pub mod config;
/// Error types for configuration and logging setup.
pub mod error;
/// Global tracing subscriber setup (filters, formats).
pub mod logging;
/// Pub/Sub: Publication, Subscriber, Unsubscribe, log records and sinks.
pub mod pubsub;

#[cfg(test)]
pub(crate) mod test_util;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Publication configuration.
pub use crate::config::PublicationConfig;
/// Operation errors and result types.
pub use error::{ConfigError, ConfigResult, LoggingError};
/// Logging setup.
pub use logging::{init_logging, LogFormat, LoggingConfig};
/// Pub/Sub API.
pub use pubsub::{
    create_publication, create_publication_with_sink, publish, subscribe, Callback, LogAction,
    LogMeta, LogRecord, LogSink, MemorySink, Publication, Subscriber, TracingSink, Unsubscribe,
    DEFAULT_PUBLICATION_NAME,
};
