use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Действие публикации, попадающее в лог.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogAction {
    /// Публикация создана.
    Create,
    /// Опубликованы данные.
    Publish,
    /// Подписчик зарегистрирован.
    Subscribe,
    /// Подписчик удалён.
    Unsubscribe,
    /// Подписчик вызван с данными.
    Notify,
}

impl LogAction {
    pub fn as_str(self) -> &'static str {
        match self {
            LogAction::Create => "create",
            LogAction::Publish => "publish",
            LogAction::Subscribe => "subscribe",
            LogAction::Unsubscribe => "unsubscribe",
            LogAction::Notify => "notify",
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Метаданные записи: имя вызванного/подписанного callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMeta {
    pub subscriber: String,
}

/// Структурированная запись о действии публикации.
///
/// Поля `data` и `meta` присутствуют только там, где они имеют смысл:
/// `data` - у `publish` и `notify`, `meta` - у `subscribe`,
/// `unsubscribe` и `notify`. При сериализации отсутствующие поля
/// опускаются.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Имя публикации.
    pub publication: String,
    pub action: LogAction,
    /// Опубликованные данные в виде JSON-значения. `null` не
    /// записывается: `()` и `None` публикуются без поля `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<LogMeta>,
}

impl LogRecord {
    pub fn new(
        publication: impl Into<String>,
        action: LogAction,
    ) -> Self {
        Self {
            publication: publication.into(),
            action,
            data: None,
            meta: None,
        }
    }

    pub fn with_data(
        self,
        data: impl Into<Value>,
    ) -> Self {
        self.with_optional_data(Some(data.into()))
    }

    /// Устанавливает `data`, отбрасывая `null`.
    pub fn with_optional_data(
        mut self,
        data: Option<Value>,
    ) -> Self {
        self.data = data.filter(|v| !v.is_null());
        self
    }

    pub fn with_subscriber(
        mut self,
        subscriber: impl Into<String>,
    ) -> Self {
        self.meta = Some(LogMeta {
            subscriber: subscriber.into(),
        });
        self
    }

    /// Сериализует запись в компактный JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
