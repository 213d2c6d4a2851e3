use std::borrow::Cow;

use parking_lot::Mutex;
use serde_json::Value;

use super::LogRecord;

/// Приёмник диагностических записей публикаций.
pub trait LogSink: Send + Sync {
    fn record(
        &self,
        record: LogRecord,
    );
}

/// Приёмник по умолчанию: отправляет записи в `tracing` с target `pusu`.
///
/// Каждая запись становится одним событием уровня `INFO` со
/// структурированными полями `publication`, `action`, `data` и
/// `subscriber`. Отсутствующие поля не записываются. Строковые данные
/// выводятся как есть, остальные значения - компактным JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(
        &self,
        record: LogRecord,
    ) {
        let subscriber = record.meta.as_ref().map(|m| m.subscriber.as_str());
        let data = record.data.as_ref().map(render_data);
        tracing::info!(
            target: "pusu",
            publication = %record.publication,
            action = %record.action,
            data = data.as_ref().map(tracing::field::display),
            subscriber = subscriber,
            "pusu"
        );
    }
}

fn render_data(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Приёмник, накапливающий записи в памяти.
///
/// Удобен в тестах и для выборочной выгрузки истории публикации.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Возвращает копию накопленных записей в порядке поступления.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Забирает накопленные записи, очищая буфер.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl LogSink for MemorySink {
    fn record(
        &self,
        record: LogRecord,
    ) {
        self.records.lock().push(record);
    }
}
