use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigResult, pubsub::DEFAULT_PUBLICATION_NAME};

/// Префикс переменных окружения: `PUSU_NAME`, `PUSU_ENABLE_LOGGING`.
pub const ENV_PREFIX: &str = "PUSU";

/// Конфигурация создаваемой публикации.
///
/// Все поля необязательны. Значение по умолчанию - анонимная публикация без
/// логирования.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationConfig {
    /// Имя для логов. Если не задано - [`DEFAULT_PUBLICATION_NAME`].
    pub name: Option<String>,
    /// Логировать каждое действие публикации. Задаётся только при создании.
    pub enable_logging: bool,
}

impl PublicationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(
        mut self,
        name: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_logging(
        mut self,
        enabled: bool,
    ) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Имя публикации с учётом значения по умолчанию.
    pub fn resolved_name(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_PUBLICATION_NAME)
    }

    /// Загружает конфигурацию из значений по умолчанию и переменных
    /// окружения с префиксом `PUSU_`.
    pub fn load() -> ConfigResult<Self> {
        Self::build(None)
    }

    /// Загружает конфигурацию из файла (формат определяется по
    /// расширению). Переменные окружения перекрывают значения файла.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> ConfigResult<Self> {
        // Добавляем значения по умолчанию
        let mut builder = Config::builder().set_default("enable_logging", false)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        // Переменные окружения с префиксом PUSU_ имеют наивысший приоритет
        let cfg = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}
