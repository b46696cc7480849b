//! 仓储同步（Sync Adapter）
//!
//! 把变更镜像到仓储，成功后整表重新加载到本地存储：
//!
//! ```text
//! Idle → Pending → 成功 → Reloading → Idle
//!                → 失败 → Idle（记录日志，发出一次错误通知）
//! ```
//!
//! 失败时本地缓存保持不变。无重试、无去重、无取消：
//! 并发的两次变更各自往返、各自重新加载。
//!
use crate::error::{DomainError, DomainResult};
use crate::form::FormInput;
use crate::mutation::{Mutation, MutationApplier, MutationOutcome};
use crate::notify::{Notice, Notification, Notifier};
use crate::persist::RecordRepository;
use crate::record::Record;
use crate::store::RecordStore;
use crate::value_object::RecordId;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};

/// 当前所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    /// 有变更请求在途
    Pending,
    /// 正在重新加载
    Reloading,
}

pub struct SyncAdapter<R: Record> {
    repository: Arc<dyn RecordRepository<R>>,
    store: Arc<RecordStore<R>>,
    applier: MutationApplier<R>,
    notifier: Arc<dyn Notifier>,
    pending: AtomicUsize,
    reloading: AtomicUsize,
    last_error: Mutex<Option<String>>,
}

/// 在途计数，离开作用域时归还
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<R: Record> SyncAdapter<R> {
    pub fn new(
        repository: Arc<dyn RecordRepository<R>>,
        applier: MutationApplier<R>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            repository,
            store: Arc::new(RecordStore::default()),
            applier,
            notifier,
            pending: AtomicUsize::new(0),
            reloading: AtomicUsize::new(0),
            last_error: Mutex::new(None),
        }
    }

    /// 本地缓存；视图从这里读取快照
    pub fn store(&self) -> Arc<RecordStore<R>> {
        Arc::clone(&self.store)
    }

    pub fn phase(&self) -> SyncPhase {
        if self.reloading.load(Ordering::SeqCst) > 0 {
            SyncPhase::Reloading
        } else if self.pending.load(Ordering::SeqCst) > 0 {
            SyncPhase::Pending
        } else {
            SyncPhase::Idle
        }
    }

    /// 最近一次失败的描述；成功的操作会清空它
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 不经仓储直接填充本地缓存（如用已知的种子数据预热）
    pub fn prime(&self, rows: Vec<R>) {
        self.applier.observe(&rows);
        self.store.replace(rows);
    }

    /// 从仓储全量加载并替换本地缓存
    pub async fn load(&self) -> DomainResult<Vec<R>> {
        let _guard = InFlight::enter(&self.reloading);
        let entity = R::schema().entity;
        match self.repository.list().await {
            Ok(rows) => {
                info!(entity, count = rows.len(), "records loaded");
                self.applier.observe(&rows);
                self.store.replace(rows.clone());
                Ok(rows)
            }
            Err(err) => {
                let message = format!("Failed to load {}", R::schema().table);
                Err(self.fail(message, err))
            }
        }
    }

    pub async fn add(&self, form: &FormInput) -> DomainResult<R> {
        let _guard = InFlight::enter(&self.pending);
        match self.insert_from(form).await {
            Ok(record) => {
                info!(entity = R::schema().entity, id = %record.id(), "record added");
                self.succeed(record.added_notice()).await;
                Ok(record)
            }
            Err(err) => Err(self.fail(self.failure_text("add"), err)),
        }
    }

    pub async fn edit(&self, id: &RecordId, form: &FormInput) -> DomainResult<R> {
        let _guard = InFlight::enter(&self.pending);
        match self.update_from(id, form).await {
            Ok(record) => {
                info!(entity = R::schema().entity, %id, "record updated");
                self.succeed(record.updated_notice()).await;
                Ok(record)
            }
            Err(err) => Err(self.fail(self.failure_text("update"), err)),
        }
    }

    /// 删除；返回被删除的记录（仓储中不存在时为 `None`）
    pub async fn delete(&self, id: &RecordId) -> DomainResult<Option<R>> {
        let _guard = InFlight::enter(&self.pending);
        let existing = match self.store.find(id) {
            Some(record) => Some(record),
            None => self.remote_find(id).await,
        };
        match self.repository.delete(id).await {
            Ok(false) => {
                warn!(entity = R::schema().entity, %id, "delete matched no record");
                self.reload().await;
                Ok(None)
            }
            Ok(true) => {
                info!(entity = R::schema().entity, %id, "record deleted");
                let notice = match &existing {
                    Some(record) => record.removed_notice(),
                    None => {
                        let schema = R::schema();
                        Notice::new(
                            format!("{} deleted", schema.entity),
                            format!("{id} has been removed from {}.", schema.collection_label),
                        )
                    }
                };
                self.succeed(notice).await;
                Ok(existing)
            }
            Err(err) => Err(self.fail(self.failure_text("delete"), err)),
        }
    }

    /// 本地缓存未命中时到仓储中找；读取失败按未找到处理
    async fn remote_find(&self, id: &RecordId) -> Option<R> {
        match self.repository.list().await {
            Ok(rows) => rows.into_iter().find(|r| r.id() == id),
            Err(err) => {
                warn!(entity = R::schema().entity, %id, error = %err, "lookup before delete failed");
                None
            }
        }
    }

    pub async fn apply(&self, mutation: Mutation) -> DomainResult<MutationOutcome<R>> {
        match mutation {
            Mutation::Add { form } => self.add(&form).await.map(MutationOutcome::Added),
            Mutation::Edit { id, form } => self.edit(&id, &form).await.map(MutationOutcome::Updated),
            Mutation::Delete { id } => self.delete(&id).await.map(MutationOutcome::Removed),
        }
    }

    async fn insert_from(&self, form: &FormInput) -> DomainResult<R> {
        let record = self.applier.add(&self.store.list(), form)?;
        self.repository.insert(&record).await?;
        Ok(record)
    }

    async fn update_from(&self, id: &RecordId, form: &FormInput) -> DomainResult<R> {
        let record = self.applier.edit(&self.store.list(), id, form)?;
        self.repository.update(id, &record).await?;
        Ok(record)
    }

    async fn succeed(&self, notice: Notice) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.reload().await;
        self.notifier.notify(Notification::info(notice));
    }

    /// 变更成功后的整表重载；失败只记录与通知，变更本身仍视为成功
    async fn reload(&self) {
        let _ = self.load().await;
    }

    fn failure_text(&self, verb: &str) -> String {
        format!("Failed to {verb} {}", R::schema().entity.to_lowercase())
    }

    fn fail(&self, message: String, err: DomainError) -> DomainError {
        error!(entity = R::schema().entity, error = %err, "{message}");
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(format!("{message}: {err}"));
        self.notifier.notify(Notification::error(Notice::failure(message)));
        err
    }
}
