//! 变更应用（Mutation Applier）
//!
//! 由当前集合与表单输入产出新记录/新集合：
//! - 新增：只做宽松转换，分配 `<PREFIX>-<NNN>` 标识，追加到末尾；
//! - 编辑：只覆盖表单里出现的字段，标识与创建日期不变；找不到时返回 `NotFound`；
//! - 删除：移除第一条匹配记录，不存在时无操作。
//!
//! 标识分配策略见 `IdStrategy`。严格模式下在转换前用结构描述校验表单。
//!
use crate::clock::{Clock, SystemClock};
use crate::error::{DomainError, DomainResult};
use crate::form::FormInput;
use crate::notify::Notice;
use crate::record::{Entity, Record};
use crate::value_object::RecordId;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// 标识分配策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// 集合长度 + 1；删除后再新增可能与现有标识重复
    CollectionLength,
    /// 历史最大序号 + 1，删除后不复用
    #[default]
    Monotonic,
}

/// 标识分配器，按策略产出下一个标识
#[derive(Debug)]
pub struct IdAllocator {
    strategy: IdStrategy,
    high_water: AtomicU64,
}

impl IdAllocator {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            strategy,
            high_water: AtomicU64::new(0),
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// 记录见过的最大序号（仅统计本前缀的标识）
    pub fn observe<R: Entity>(&self, records: &[R]) {
        let max = records
            .iter()
            .filter(|r| r.id().prefix() == Some(R::PREFIX))
            .filter_map(|r| r.id().sequence())
            .max()
            .unwrap_or(0);
        self.high_water.fetch_max(max, Ordering::SeqCst);
    }

    pub fn next<R: Entity>(&self, current: &[R]) -> RecordId {
        let sequence = match self.strategy {
            IdStrategy::CollectionLength => current.len() as u64 + 1,
            IdStrategy::Monotonic => {
                self.observe(current);
                self.high_water.fetch_add(1, Ordering::SeqCst) + 1
            }
        };
        RecordId::format(R::PREFIX, sequence)
    }
}

/// 一次变更请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mutation {
    Add { form: FormInput },
    Edit { id: RecordId, form: FormInput },
    Delete { id: RecordId },
}

/// 变更结果
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome<R> {
    Added(R),
    Updated(R),
    /// 删除的记录；不存在时为 `None`
    Removed(Option<R>),
}

impl<R: Record> MutationOutcome<R> {
    pub fn record(&self) -> Option<&R> {
        match self {
            Self::Added(r) | Self::Updated(r) => Some(r),
            Self::Removed(r) => r.as_ref(),
        }
    }

    /// 成功提示；删除不存在的记录时无提示
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Added(r) => Some(r.added_notice()),
            Self::Updated(r) => Some(r.updated_notice()),
            Self::Removed(r) => r.as_ref().map(Record::removed_notice),
        }
    }
}

/// 变更应用器，每类记录一个实例（持有该集合的标识水位）
pub struct MutationApplier<R> {
    allocator: IdAllocator,
    clock: Arc<dyn Clock>,
    strict: bool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MutationApplier<R> {
    pub fn new(strategy: IdStrategy, clock: Arc<dyn Clock>) -> Self {
        Self {
            allocator: IdAllocator::new(strategy),
            clock,
            strict: false,
            _record: PhantomData,
        }
    }

    /// 开启后拒绝缺失必填项与无法解析的数值
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn allocator(&self) -> &IdAllocator {
        &self.allocator
    }

    /// 同步外部加载的集合，避免单调策略下与已有标识冲突
    pub fn observe(&self, records: &[R]) {
        self.allocator.observe(records);
    }

    pub fn add(&self, current: &[R], form: &FormInput) -> DomainResult<R> {
        if self.strict {
            R::schema().check_create(form)?;
        }
        let id = self.allocator.next(current);
        Ok(R::from_form(id, form, self.clock.today()))
    }

    pub fn edit(&self, current: &[R], id: &RecordId, form: &FormInput) -> DomainResult<R> {
        if self.strict {
            R::schema().check_update(form)?;
        }
        let mut record = current
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(R::schema().entity, id))?;
        record.apply_form(form, self.clock.today());
        Ok(record)
    }

    pub fn delete(&self, current: &[R], id: &RecordId) -> Option<R> {
        current.iter().find(|r| r.id() == id).cloned()
    }

    /// 在集合上就地应用一次变更
    pub fn apply(&self, records: &mut Vec<R>, mutation: Mutation) -> DomainResult<MutationOutcome<R>> {
        match mutation {
            Mutation::Add { form } => {
                let record = self.add(records, &form)?;
                records.push(record.clone());
                Ok(MutationOutcome::Added(record))
            }
            Mutation::Edit { id, form } => {
                let record = self.edit(records, &id, &form)?;
                if let Some(slot) = records.iter_mut().find(|r| r.id() == &id) {
                    *slot = record.clone();
                }
                Ok(MutationOutcome::Updated(record))
            }
            Mutation::Delete { id } => {
                let removed = records
                    .iter()
                    .position(|r| r.id() == &id)
                    .map(|index| records.remove(index));
                Ok(MutationOutcome::Removed(removed))
            }
        }
    }
}

impl<R: Record> Default for MutationApplier<R> {
    fn default() -> Self {
        Self::new(IdStrategy::default(), Arc::new(SystemClock))
    }
}
