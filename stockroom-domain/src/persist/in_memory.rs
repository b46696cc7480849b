use super::RecordRepository;
use crate::error::{DomainError, DomainResult};
use crate::record::Record;
use crate::value_object::RecordId;
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

/// 内存仓储；进程内有效，不跨重启
#[derive(Debug, Default)]
pub struct InMemoryRepository<R> {
    rows: RwLock<Vec<R>>,
}

impl<R: Record> InMemoryRepository<R> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    pub fn seeded(rows: Vec<R>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl<R: Record> RecordRepository<R> for InMemoryRepository<R> {
    async fn list(&self) -> DomainResult<Vec<R>> {
        Ok(self
            .rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    async fn insert(&self, record: &R) -> DomainResult<()> {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
        Ok(())
    }

    async fn update(&self, id: &RecordId, record: &R) -> DomainResult<()> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.iter_mut().find(|r| r.id() == id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(())
            }
            None => Err(DomainError::not_found(R::schema().entity, id)),
        }
    }

    async fn delete(&self, id: &RecordId) -> DomainResult<bool> {
        let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
        match rows.iter().position(|r| r.id() == id) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
