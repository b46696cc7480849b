//! 记录视图（Record View）
//!
//! 持有一类记录的界面状态：搜索词、分面取值与排序状态。
//! 可见行从不存储，每次 `rows()` 都从存储的当前快照重新推导：
//! `snapshot → TextSearch ∧ FieldEquals… → 稳定排序`。
//!
use crate::dto::RecordPage;
use std::collections::BTreeMap;
use std::sync::Arc;
use stockroom_domain::error::{DomainError, DomainResult};
use stockroom_domain::record::Record;
use stockroom_domain::sort::{SortState, sort_rows};
use stockroom_domain::specification::{
    AndSpecification, FieldEquals, Specification, TextSearch, filter,
};
use stockroom_domain::store::RecordStore;
use stockroom_domain::summary;

pub struct RecordView<R: Record> {
    store: Arc<RecordStore<R>>,
    query: String,
    facets: BTreeMap<String, String>,
    sort: Option<SortState>,
}

impl<R: Record> RecordView<R> {
    /// 以结构描述中的默认排序（若有）初始化
    pub fn new(store: Arc<RecordStore<R>>) -> Self {
        Self {
            store,
            query: String::new(),
            facets: BTreeMap::new(),
            sort: R::schema().default_sort.map(SortState::by),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn facet(&self, field: &str) -> Option<&str> {
        self.facets.get(field).map(String::as_str)
    }

    /// 设置分面取值；空值表示取消该分面
    pub fn set_facet(&mut self, field: impl Into<String>, value: impl Into<String>) -> DomainResult<()> {
        let field = field.into();
        if !R::schema().is_facet(&field) {
            return Err(DomainError::invalid_value(field, "not a facet"));
        }
        let value = value.into();
        if value.is_empty() {
            self.facets.remove(&field);
        } else {
            self.facets.insert(field, value);
        }
        Ok(())
    }

    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn set_sort(&mut self, sort: Option<SortState>) -> DomainResult<()> {
        if let Some(state) = &sort {
            R::schema().sort_key(&state.key)?;
        }
        self.sort = sort;
        Ok(())
    }

    /// 点击表头：同列翻转方向，换列则从降序开始
    pub fn toggle_sort(&mut self, key: &str) -> DomainResult<()> {
        R::schema().sort_key(key)?;
        match &mut self.sort {
            Some(state) => state.toggle(key),
            None => self.sort = Some(SortState::by(key)),
        }
        Ok(())
    }

    fn predicate(&self) -> Box<dyn Specification<R>> {
        let mut spec: Box<dyn Specification<R>> = Box::new(TextSearch::<R>::new(&self.query));
        for (field, value) in &self.facets {
            spec = Box::new(AndSpecification::new(
                spec,
                Box::new(FieldEquals::<R>::new(field.as_str(), value.as_str())),
            ));
        }
        spec
    }

    /// 当前可见行
    pub fn rows(&self) -> DomainResult<Vec<R>> {
        self.page().map(|page| page.rows)
    }

    pub fn page(&self) -> DomainResult<RecordPage<R>> {
        let snapshot = self.store.list();
        let total = snapshot.len();
        let rows = sort_rows(filter(&snapshot, &self.predicate()), self.sort.as_ref())?;
        Ok(RecordPage { rows, total })
    }

    /// 分面下拉框的选项（去重、排序）
    pub fn facet_options(&self, field: &str) -> DomainResult<Vec<String>> {
        if !R::schema().is_facet(field) {
            return Err(DomainError::invalid_value(field, "not a facet"));
        }
        Ok(summary::distinct_values(&self.store.list(), field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_domain::model::{Category, Customer, Warehouse};
    use stockroom_domain::seed;
    use stockroom_domain::sort::SortDirection;

    fn customers() -> RecordView<Customer> {
        RecordView::new(Arc::new(RecordStore::new(seed::customers())))
    }

    fn ids<R: Record>(rows: &[R]) -> Vec<String> {
        rows.iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn empty_view_shows_everything_in_order() {
        let view = customers();
        assert_eq!(view.rows().unwrap(), seed::customers());
    }

    #[test]
    fn facet_and_query_combine() {
        let mut view = customers();
        view.set_facet("state", "Texas").unwrap();
        assert_eq!(
            ids(&view.rows().unwrap()),
            ["CUST-002", "CUST-007", "CUST-009", "CUST-014"]
        );

        view.set_query("SAN");
        assert_eq!(ids(&view.rows().unwrap()), ["CUST-007"]);

        view.set_facet("state", "").unwrap();
        assert_eq!(view.rows().unwrap().len(), 4);
    }

    #[test]
    fn unknown_facet_is_rejected() {
        let mut view = customers();
        let err = view.set_facet("city", "Austin").unwrap_err();
        assert!(matches!(err, DomainError::InvalidValue { .. }));
        assert!(view.facet_options("zipcode").is_err());
    }

    #[test]
    fn rows_follow_store_changes() {
        let store = Arc::new(RecordStore::new(seed::customers()));
        let mut view = RecordView::new(store.clone());
        view.set_facet("state", "Texas").unwrap();
        assert_eq!(view.rows().unwrap().len(), 4);

        store.update(|rows| rows.retain(|c| c.id.as_str() != "CUST-002"));
        assert_eq!(view.rows().unwrap().len(), 3);
    }

    #[test]
    fn category_view_defaults_to_items_descending() {
        let view = RecordView::new(Arc::new(RecordStore::new(seed::categories())));
        assert_eq!(view.sort(), Some(&SortState::new("items", SortDirection::Desc)));
        let rows: Vec<Category> = view.rows().unwrap();
        assert_eq!(rows[0].name, "Books");
        assert_eq!(rows[9].name, "Automotive");
    }

    #[test]
    fn toggle_sort_validates_and_flips() {
        let mut view: RecordView<Warehouse> =
            RecordView::new(Arc::new(RecordStore::new(seed::warehouses())));
        assert!(view.toggle_sort("name").is_err());
        assert!(view.sort().is_none());

        view.toggle_sort("usage").unwrap();
        assert_eq!(ids(&view.rows().unwrap())[0], "WH-003");
        view.toggle_sort("usage").unwrap();
        assert_eq!(ids(&view.rows().unwrap())[0], "WH-004");
    }

    #[test]
    fn page_reports_total_and_matches() {
        let mut view = customers();
        view.set_query("cust-01");
        let page = view.page().unwrap();
        assert_eq!(page.total, 20);
        assert_eq!(page.matched(), 10);
        assert_eq!(view.facet_options("state").unwrap().len(), 15);
    }
}
