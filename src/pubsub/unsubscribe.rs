use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, Ordering},
        Weak,
    },
};

use super::{publication::Shared, Subscriber};

/// Дескриптор отписки, возвращаемый `subscribe`.
///
/// Первый вызов [`Unsubscribe::unsubscribe`] удаляет первое по порядку
/// вхождение своего подписчика из публикации; все последующие вызовы
/// ничего не делают. Дескриптор держит только слабую ссылку и не
/// продлевает жизнь публикации: если публикация уже удалена, отписка -
/// no-op.
///
/// Удаление дескриптора (`Drop`) подписку не отменяет.
pub struct Unsubscribe<T> {
    publication: Weak<Shared<T>>,
    subscriber: Subscriber<T>,
    spent: AtomicBool,
}

impl<T> Unsubscribe<T> {
    pub(crate) fn new(
        publication: Weak<Shared<T>>,
        subscriber: Subscriber<T>,
    ) -> Self {
        Self {
            publication,
            subscriber,
            spent: AtomicBool::new(false),
        }
    }

    /// Отписывает подписчика. Идемпотентно.
    pub fn unsubscribe(&self) {
        // Только первый вызов доходит до публикации, даже при гонке.
        if self.spent.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(shared) = self.publication.upgrade() {
            shared.remove_first(&self.subscriber);
        }
    }

    /// `true`, если дескриптор уже был вызван.
    pub fn is_spent(&self) -> bool {
        self.spent.load(Ordering::Acquire)
    }

    /// Подписчик, которого удаляет этот дескриптор.
    pub fn subscriber(&self) -> &Subscriber<T> {
        &self.subscriber
    }
}

impl<T> fmt::Debug for Unsubscribe<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Unsubscribe")
            .field("subscriber", &self.subscriber)
            .field("spent", &self.is_spent())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use crate::{Publication, Subscriber};

    /// Тест проверяет флаг `is_spent`.
    #[test]
    fn test_spent_flag() {
        let p = Publication::<u8>::default();
        let u = p.subscribe(|_| {});
        assert!(!u.is_spent());

        u.unsubscribe();
        assert!(u.is_spent());
        assert_eq!(p.subscriber_count(), 0);
    }

    /// Тест проверяет, что повторный вызов дескриптора не удаляет другую
    /// регистрацию того же подписчика.
    #[test]
    fn test_repeated_call_keeps_other_registration() {
        let p = Publication::<u8>::default();
        let sub = Subscriber::new(|_: &u8| {});
        let u1 = p.subscribe_with(sub.clone());
        let _u2 = p.subscribe_with(sub.clone());

        for _ in 0..100 {
            u1.unsubscribe();
        }

        assert_eq!(p.subscriber_count(), 1);
    }

    /// Тест проверяет, что дескриптор не удерживает публикацию.
    #[test]
    fn test_handle_outlives_publication() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let u = {
            let p = Publication::<u8>::default();
            p.subscribe(move |_| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            })
        };

        // Публикация удалена, отписка просто ничего не делает.
        u.unsubscribe();
        assert!(u.is_spent());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    /// Тест проверяет, что удаление дескриптора не отписывает.
    #[test]
    fn test_drop_keeps_subscription() {
        let p = Publication::<u8>::default();
        drop(p.subscribe(|_| {}));
        assert_eq!(p.subscriber_count(), 1);
    }

    /// Тест проверяет, что при конкурентных вызовах удаляется ровно одно
    /// вхождение.
    #[test]
    fn test_concurrent_unsubscribe_removes_once() {
        let p = Publication::<u8>::default();
        let sub = Subscriber::new(|_: &u8| {});
        for _ in 0..4 {
            p.subscribe_with(sub.clone());
        }
        let u = Arc::new(p.subscribe_with(sub.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let u = u.clone();
                std::thread::spawn(move || u.unsubscribe())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(p.subscriber_count(), 4);
    }
}
