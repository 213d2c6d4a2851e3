use std::{fmt, sync::Arc};

/// Тип функции-подписчика: вызывается синхронно при каждой публикации.
pub type Callback<T> = dyn Fn(&T) + Send + Sync;

/// Подписчик публикации: callback и его диагностическое имя.
///
/// Идентичность подписчика определяется указателем на общий callback:
/// клоны одного `Subscriber` считаются "той же ссылкой" и при отписке
/// совпадают, а два `Subscriber`, созданные из одинаковых замыканий, -
/// нет.
///
/// Имя используется только в логах. У анонимного подписчика оно пустое.
pub struct Subscriber<T> {
    name: Arc<str>,
    callback: Arc<Callback<T>>,
}

impl<T> Subscriber<T> {
    /// Создаёт анонимного подписчика.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self::named("", callback)
    }

    /// Создаёт подписчика с диагностическим именем.
    pub fn named<F>(
        name: impl Into<Arc<str>>,
        callback: F,
    ) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            callback: Arc::new(callback),
        }
    }

    /// Возвращает диагностическое имя (пустая строка для анонимного).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Проверяет, ссылаются ли оба значения на один и тот же callback.
    pub fn same(
        &self,
        other: &Self,
    ) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }

    #[inline]
    pub(crate) fn notify(
        &self,
        data: &T,
    ) {
        (self.callback)(data)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<T> fmt::Debug for Subscriber<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("name", &self.name)
            .field("callback", &Arc::as_ptr(&self.callback))
            .finish()
    }
}
