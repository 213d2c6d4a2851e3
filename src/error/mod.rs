pub mod config;
pub mod logging;

// Публичный экспорт всех типов ошибок из вложенных модулей, чтобы упростить
// доступ к ним из внешнего кода.
pub use self::config::{ConfigError, ConfigResult};
pub use logging::LoggingError;
