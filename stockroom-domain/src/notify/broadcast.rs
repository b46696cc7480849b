//! 广播通知
//!
//! 基于 `tokio::sync::broadcast`：`notify` 克隆并广播，`subscribe` 返回 `'static` 流，
//! 便于在 `tokio::spawn` 中消费。无订阅者时通知被丢弃。
//!
use super::{Notification, Notifier};
use crate::error::{DomainError, DomainResult};
use futures_core::stream::BoxStream;
use futures_util::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    /// `capacity` 为广播缓冲区容量，慢订阅者超出后会收到 lag 错误
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> BoxStream<'static, DomainResult<Notification>> {
        let stream = BroadcastStream::new(self.tx.subscribe()).map(|r| {
            r.map_err(|e| DomainError::Notification {
                reason: e.to_string(),
            })
        });
        Box::pin(stream)
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        // 无订阅者时 send 返回错误，忽略
        let _ = self.tx.send(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notice;

    #[tokio::test]
    async fn subscriber_receives_notifications_in_order() {
        let notifier = BroadcastNotifier::new(8);
        let mut stream = notifier.subscribe();
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.notify(Notification::info(Notice::new("Order added", "first")));
        notifier.notify(Notification::error(Notice::failure("second")));

        let first = stream.next().await.unwrap().unwrap();
        let second = stream.next().await.unwrap().unwrap();
        assert_eq!(first.description(), "first");
        assert!(second.is_error());
    }

    #[test]
    fn notify_without_subscribers_is_silent() {
        let notifier = BroadcastNotifier::default();
        notifier.notify(Notification::info(Notice::new("t", "d")));
        assert_eq!(notifier.subscriber_count(), 0);
    }
}
