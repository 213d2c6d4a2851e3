use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Ошибка загрузки конфигурации публикации.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Источник не прочитан или значения не десериализуются.
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
