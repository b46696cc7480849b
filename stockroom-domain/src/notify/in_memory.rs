use super::{Notification, Notifier};
use std::sync::{Mutex, PoisonError};

/// 记录全部通知的内存实现，适用于测试与命令行演示
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    history: Mutex<Vec<Notification>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已发出的通知（按时间顺序）
    pub fn history(&self) -> Vec<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 取走并清空
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.history.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn last(&self) -> Option<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notice;

    #[test]
    fn drain_empties_history() {
        let notifier = InMemoryNotifier::new();
        notifier.notify(Notification::info(Notice::new("a", "b")));
        notifier.notify(Notification::info(Notice::new("c", "d")));
        assert_eq!(notifier.history().len(), 2);
        assert_eq!(notifier.last().map(|n| n.title().to_string()), Some("c".into()));
        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.history().is_empty());
    }
}
