//! 记录处理器
//!
//! 一个 `RecordHandler<R>` 同时处理某类记录的增删改命令与列表/分面查询：
//! 命令转交同步适配器，查询从适配器的快照重新推导。
//!
use crate::command::{AddRecord, DeleteRecord, EditRecord};
use crate::command_handler::CommandHandler;
use crate::context::AppContext;
use crate::dto::{FacetOptions, RecordPage};
use crate::error::AppError;
use crate::query::{FacetValues, ListRecords};
use crate::query_handler::QueryHandler;
use crate::view::RecordView;
use async_trait::async_trait;
use std::sync::Arc;
use stockroom_domain::record::Record;
use stockroom_domain::sync::SyncAdapter;

pub struct RecordHandler<R: Record> {
    adapter: Arc<SyncAdapter<R>>,
}

impl<R: Record> RecordHandler<R> {
    pub fn new(adapter: Arc<SyncAdapter<R>>) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl<R: Record> CommandHandler<AddRecord<R>> for RecordHandler<R> {
    async fn handle(&self, _ctx: &AppContext, cmd: AddRecord<R>) -> Result<(), AppError> {
        self.adapter.add(&cmd.form).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: Record> CommandHandler<EditRecord<R>> for RecordHandler<R> {
    async fn handle(&self, _ctx: &AppContext, cmd: EditRecord<R>) -> Result<(), AppError> {
        self.adapter.edit(&cmd.id, &cmd.form).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: Record> CommandHandler<DeleteRecord<R>> for RecordHandler<R> {
    async fn handle(&self, _ctx: &AppContext, cmd: DeleteRecord<R>) -> Result<(), AppError> {
        self.adapter.delete(&cmd.id).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: Record> QueryHandler<ListRecords<R>> for RecordHandler<R> {
    async fn handle(&self, _ctx: &AppContext, q: ListRecords<R>) -> Result<RecordPage<R>, AppError> {
        let mut view = RecordView::new(self.adapter.store());
        view.set_query(q.query);
        for (field, value) in q.facets {
            view.set_facet(field, value)?;
        }
        // 未指定时沿用结构描述的默认排序
        if q.sort.is_some() {
            view.set_sort(q.sort)?;
        }
        Ok(view.page()?)
    }
}

#[async_trait]
impl<R: Record> QueryHandler<FacetValues<R>> for RecordHandler<R> {
    async fn handle(&self, _ctx: &AppContext, q: FacetValues<R>) -> Result<FacetOptions, AppError> {
        let view = RecordView::new(self.adapter.store());
        let values = view.facet_options(&q.field)?;
        Ok(FacetOptions {
            field: q.field,
            values,
        })
    }
}
