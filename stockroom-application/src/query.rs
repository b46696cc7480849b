use crate::dto::{Dto, FacetOptions, RecordPage};
use std::fmt;
use std::marker::PhantomData;
use stockroom_domain::record::Record;
use stockroom_domain::sort::SortState;

/// 应用层查询（Query）
///
/// 只读意图，结果为 [`Dto`](crate::dto::Dto)。
pub trait Query: Send + Sync + 'static {
    const NAME: &'static str;

    type Dto: Dto;
}

/// 一次性列出视图：文本搜索 + 分面 + 排序，全部基于当前快照重新推导
pub struct ListRecords<R> {
    pub query: String,
    /// `(字段, 取值)`，取值为空表示不过滤
    pub facets: Vec<(String, String)>,
    pub sort: Option<SortState>,
    _record: PhantomData<fn() -> R>,
}

impl<R> ListRecords<R> {
    pub fn all() -> Self {
        Self {
            query: String::new(),
            facets: Vec::new(),
            sort: None,
            _record: PhantomData,
        }
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn facet(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.facets.push((field.into(), value.into()));
        self
    }

    pub fn sorted(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }
}

impl<R> Default for ListRecords<R> {
    fn default() -> Self {
        Self::all()
    }
}

impl<R> fmt::Debug for ListRecords<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRecords")
            .field("query", &self.query)
            .field("facets", &self.facets)
            .field("sort", &self.sort)
            .finish()
    }
}

/// 某分面字段的可选值
pub struct FacetValues<R> {
    pub field: String,
    _record: PhantomData<fn() -> R>,
}

impl<R> FacetValues<R> {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Query for ListRecords<R> {
    const NAME: &'static str = "ListRecords";
    type Dto = RecordPage<R>;
}

impl<R: Record> Query for FacetValues<R> {
    const NAME: &'static str = "FacetValues";
    type Dto = FacetOptions;
}
