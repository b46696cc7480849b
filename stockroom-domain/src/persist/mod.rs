//! 记录仓储（persist）
//!
//! 统一的仓储协议，视图引擎不关心记录来自内存还是远端：
//! - `InMemoryRepository`：以种子数据初始化的内存实现；
//! - `PostgrestRepository`（feature `remote`）：PostgREST/Supabase 风格的 REST 表。
//!
//! 每个调用是一次往返，无重试、无乐观并发检查。
//!
mod in_memory;
#[cfg(feature = "remote")]
mod postgrest;

pub use in_memory::InMemoryRepository;
#[cfg(feature = "remote")]
pub use postgrest::PostgrestRepository;

use crate::error::DomainResult;
use crate::record::Record;
use crate::value_object::RecordId;
use async_trait::async_trait;
use bon::Builder;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

#[async_trait]
pub trait RecordRepository<R>: Send + Sync
where
    R: Record,
{
    /// 全量读取
    async fn list(&self) -> DomainResult<Vec<R>>;

    async fn insert(&self, record: &R) -> DomainResult<()>;

    /// 按标识整体覆盖（标识本身不写）
    async fn update(&self, id: &RecordId, record: &R) -> DomainResult<()>;

    /// 返回是否确有记录被删除
    async fn delete(&self, id: &RecordId) -> DomainResult<bool>;
}

#[async_trait]
impl<R, T> RecordRepository<R> for Arc<T>
where
    R: Record,
    T: RecordRepository<R> + ?Sized,
{
    async fn list(&self) -> DomainResult<Vec<R>> {
        (**self).list().await
    }

    async fn insert(&self, record: &R) -> DomainResult<()> {
        (**self).insert(record).await
    }

    async fn update(&self, id: &RecordId, record: &R) -> DomainResult<()> {
        (**self).update(id, record).await
    }

    async fn delete(&self, id: &RecordId) -> DomainResult<bool> {
        (**self).delete(id).await
    }
}

/// 远端表地址与密钥
#[derive(Builder, Clone, Deserialize)]
pub struct RemoteConfig {
    /// 项目根地址，如 `https://xyz.supabase.co`
    #[builder(into)]
    pub url: String,
    #[builder(into)]
    pub api_key: String,
    /// 单次请求超时；缺省不设超时
    pub timeout_secs: Option<u64>,
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
