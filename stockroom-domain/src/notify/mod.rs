//! 操作结果通知（notify）
//!
//! 变更成功或远端失败后发出的一次性提示。这里只建模提示内容与分发，
//! 展示方式（toast 组件等）由上层决定。
//!
//! - `Notice`：标题 + 描述，由记录类型按自身文案生成；
//! - `Notification`：带标识、级别与时间的完整通知；
//! - `Notifier`：分发协议，提供内存与广播两种实现。
//!
mod broadcast;
mod in_memory;

pub use broadcast::BroadcastNotifier;
pub use in_memory::InMemoryNotifier;

use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// 通知级别
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Info,
    Error,
}

/// 通知文案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// 远端操作失败：标题固定为 `Error`，如 `Failed to add product`
    pub fn failure(description: impl Into<String>) -> Self {
        Self::new("Error", description)
    }
}

#[derive(Builder, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[builder(default = Uuid::new_v4())]
    id: Uuid,
    #[builder(default)]
    level: Level,
    #[builder(into)]
    title: String,
    #[builder(into)]
    description: String,
    #[builder(default = Utc::now())]
    at: DateTime<Utc>,
}

impl Notification {
    pub fn info(notice: Notice) -> Self {
        Self::builder()
            .title(notice.title)
            .description(notice.description)
            .build()
    }

    pub fn error(notice: Notice) -> Self {
        Self::builder()
            .level(Level::Error)
            .title(notice.title)
            .description(notice.description)
            .build()
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn at(&self) -> DateTime<Utc> {
        self.at
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

/// 通知分发协议
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

impl<T> Notifier for Arc<T>
where
    T: Notifier + ?Sized,
{
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let n = Notification::builder()
            .title("Customer added")
            .description("Jane has been added to the customer list.")
            .build();
        assert_eq!(n.level(), Level::Info);
        assert!(!n.is_error());
        assert_eq!(n.title(), "Customer added");
    }

    #[test]
    fn failure_notice_is_error() {
        let n = Notification::error(Notice::failure("Failed to load products"));
        assert!(n.is_error());
        assert_eq!(n.title(), "Error");
        assert_eq!(n.description(), "Failed to load products");
    }
}
