//! 记录存储（Record Store）
//!
//! 一类记录的内存集合。对远端记录而言它只是最近一次成功 `list` 的缓存；
//! 不做唯一性检查。
//!
use crate::record::Entity;
use crate::value_object::RecordId;
use std::sync::{PoisonError, RwLock};

#[derive(Debug)]
pub struct RecordStore<R> {
    records: RwLock<Vec<R>>,
}

// 手写以免对 `R` 引入 `Default` 约束
impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R: Entity> RecordStore<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// 当前快照
    pub fn list(&self) -> Vec<R> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, records: Vec<R>) {
        *self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner) = records;
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn find(&self, id: &RecordId) -> Option<R> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    /// 在写锁内修改集合
    pub fn update<T>(&self, f: impl FnOnce(&mut Vec<R>) -> T) -> T {
        let mut guard = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
