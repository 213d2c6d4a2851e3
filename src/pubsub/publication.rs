use std::{fmt, sync::Arc};

use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;

use super::{LogAction, LogRecord, LogSink, Subscriber, TracingSink, Unsubscribe};
use crate::config::PublicationConfig;

/// Имя публикации, если в конфигурации оно не задано.
pub const DEFAULT_PUBLICATION_NAME: &str = "Unknown";

/// Публикация: изолированный канал с упорядоченным списком подписчиков.
///
/// Доставка синхронная: [`Publication::publish`] вызывает каждого
/// подписчика по очереди на потоке вызывающего и возвращается после
/// последнего из них.
///
/// `Publication` - дешёвый дескриптор. `clone()` даёт ещё одну ссылку на
/// тот же канал, а не новый канал; сравнить дескрипторы можно через
/// [`Publication::ptr_eq`].
pub struct Publication<T> {
    pub(crate) shared: Arc<Shared<T>>,
}

/// Общее состояние публикации.
pub(crate) struct Shared<T> {
    name: Arc<str>,
    /// Подписчики в порядке подписки.
    subscribers: Mutex<Vec<Subscriber<T>>>,
    /// `None` - логирование выключено навсегда.
    sink: Option<Arc<dyn LogSink>>,
}

impl<T> Shared<T> {
    /// Удаляет первое вхождение подписчика. Возвращает `true`, если
    /// вхождение найдено.
    pub(crate) fn remove_first(
        &self,
        subscriber: &Subscriber<T>,
    ) -> bool {
        self.log(|| {
            LogRecord::new(&*self.name, LogAction::Unsubscribe).with_subscriber(subscriber.name())
        });

        let mut subscribers = self.subscribers.lock();
        match subscribers.iter().position(|s| s.same(subscriber)) {
            Some(index) => {
                subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Передаёт запись в приёмник. Запись строится только при включённом
    /// логировании.
    #[inline]
    fn log(
        &self,
        record: impl FnOnce() -> LogRecord,
    ) {
        if let Some(sink) = &self.sink {
            sink.record(record());
        }
    }
}

impl<T> Publication<T> {
    /// Создаёт публикацию по конфигурации, направляя записи в
    /// [`TracingSink`].
    pub fn new(config: PublicationConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Создаёт публикацию с собственным приёмником записей.
    ///
    /// Приёмник используется только если `enable_logging == true`.
    pub fn with_sink(
        config: PublicationConfig,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        let name: Arc<str> = Arc::from(config.resolved_name());
        let shared = Shared {
            name,
            subscribers: Mutex::new(Vec::new()),
            sink: config.enable_logging.then_some(sink),
        };
        shared.log(|| LogRecord::new(&*shared.name, LogAction::Create));

        Self {
            shared: Arc::new(shared),
        }
    }

    /// Возвращает имя публикации.
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.shared.sink.is_some()
    }

    /// Количество текущих регистраций (с учётом повторных подписок).
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers.lock().len()
    }

    /// Проверяет, указывают ли оба дескриптора на одну публикацию.
    pub fn ptr_eq(
        &self,
        other: &Self,
    ) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Подписывает замыкание как нового анонимного подписчика.
    pub fn subscribe<F>(
        &self,
        callback: F,
    ) -> Unsubscribe<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_with(Subscriber::new(callback))
    }

    /// Добавляет подписчика в конец списка.
    ///
    /// Один и тот же подписчик может быть зарегистрирован несколько раз:
    /// каждый раз возвращается независимый дескриптор отписки, и при
    /// публикации он вызывается по разу на каждую регистрацию.
    pub fn subscribe_with(
        &self,
        subscriber: Subscriber<T>,
    ) -> Unsubscribe<T> {
        self.shared.log(|| {
            LogRecord::new(self.name(), LogAction::Subscribe).with_subscriber(subscriber.name())
        });

        self.shared.subscribers.lock().push(subscriber.clone());

        Unsubscribe::new(Arc::downgrade(&self.shared), subscriber)
    }

    /// Удаляет первое вхождение подписчика.
    ///
    /// Возвращает `false`, если подписчик не был зарегистрирован.
    pub fn unsubscribe(
        &self,
        subscriber: &Subscriber<T>,
    ) -> bool {
        self.shared.remove_first(subscriber)
    }
}

impl<T: Serialize> Publication<T> {
    /// Публикует данные всем подписчикам.
    ///
    /// Список подписчиков копируется в начале вызова: подписки и
    /// отписки, сделанные подписчиками во время рассылки, вступают в силу
    /// со следующей публикации. Блокировка на время вызова подписчиков не
    /// удерживается, поэтому подписчик может обращаться к этой же
    /// публикации.
    ///
    /// Ограничение `T: Serialize` нужно только для поля `data` в записях
    /// лога; при выключенном логировании данные не сериализуются.
    pub fn publish(
        &self,
        data: T,
    ) {
        let snapshot: Vec<Subscriber<T>> = self.shared.subscribers.lock().clone();

        // Значение для лога строится один раз на вызов. `()` и `None`
        // сериализуются в `null` и в запись не попадают.
        let logged = self
            .shared
            .sink
            .as_ref()
            .and_then(|_| log_value(&data));

        self.shared.log(|| {
            LogRecord::new(self.name(), LogAction::Publish).with_optional_data(logged.clone())
        });

        for subscriber in &snapshot {
            self.shared.log(|| {
                LogRecord::new(self.name(), LogAction::Notify)
                    .with_optional_data(logged.clone())
                    .with_subscriber(subscriber.name())
            });
            subscriber.notify(&data);
        }
    }
}

/// Сериализует данные публикации для лога. `null` означает отсутствие
/// данных; ошибка сериализации не мешает доставке.
fn log_value<T: Serialize>(data: &T) -> Option<Value> {
    match serde_json::to_value(data) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(target: "pusu", error = %e, "failed to serialize published data");
            None
        }
    }
}

impl<T> Clone for Publication<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T> Default for Publication<T> {
    fn default() -> Self {
        Self::new(PublicationConfig::default())
    }
}

impl<T> fmt::Debug for Publication<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Publication")
            .field("name", &self.shared.name)
            .field("subscribers", &self.subscriber_count())
            .field("logging", &self.is_logging_enabled())
            .finish()
    }
}

/// Создаёт новую публикацию. Каждый вызов возвращает отдельный канал.
pub fn create_publication<T>(config: PublicationConfig) -> Publication<T> {
    Publication::new(config)
}

/// Создаёт публикацию с заданным приёмником записей.
pub fn create_publication_with_sink<T>(
    config: PublicationConfig,
    sink: Arc<dyn LogSink>,
) -> Publication<T> {
    Publication::with_sink(config, sink)
}

/// Публикует данные всем подписчикам `publication`.
pub fn publish<T: Serialize>(
    publication: &Publication<T>,
    data: T,
) {
    publication.publish(data)
}

/// Подписывает замыкание на `publication`.
pub fn subscribe<T, F>(
    publication: &Publication<T>,
    callback: F,
) -> Unsubscribe<T>
where
    F: Fn(&T) + Send + Sync + 'static,
{
    publication.subscribe(callback)
}
