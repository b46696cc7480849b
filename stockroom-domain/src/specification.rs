//! 规约（Specification）
//!
//! 将“某条记录是否应出现在视图中”封装为可组合的谓词：
//! - `TextSearch`：自由文本，对结构中标记为可搜索的字段做不区分大小写的子串匹配；
//! - `FieldEquals`：分类字段精确匹配（如按州筛选）；
//! - 通过 `and`/`or`/`not` 组合，`filter` 按原顺序取出满足的子序列。
//!
use crate::record::Record;
use std::marker::PhantomData;

/// 规约模式的核心 trait
pub trait Specification<T> {
    /// 检查候选对象是否满足规约
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// 与另一个规约进行 AND 组合
    fn and<S>(self, other: S) -> AndSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        AndSpecification::new(Box::new(self), Box::new(other))
    }

    /// 与另一个规约进行 OR 组合
    fn or<S>(self, other: S) -> OrSpecification<T>
    where
        Self: Sized + 'static,
        S: Specification<T> + 'static,
    {
        OrSpecification::new(Box::new(self), Box::new(other))
    }

    /// 对规约取反
    fn not(self) -> NotSpecification<T>
    where
        Self: Sized + 'static,
    {
        NotSpecification::new(Box::new(self))
    }
}

impl<T> Specification<T> for Box<dyn Specification<T>> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// AND 组合规约
pub struct AndSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> AndSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }
}

/// OR 组合规约
pub struct OrSpecification<T> {
    left: Box<dyn Specification<T>>,
    right: Box<dyn Specification<T>>,
}

impl<T> OrSpecification<T> {
    pub fn new(left: Box<dyn Specification<T>>, right: Box<dyn Specification<T>>) -> Self {
        Self { left, right }
    }
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }
}

/// NOT 规约
pub struct NotSpecification<T> {
    inner: Box<dyn Specification<T>>,
}

impl<T> NotSpecification<T> {
    pub fn new(inner: Box<dyn Specification<T>>) -> Self {
        Self { inner }
    }
}

impl<T> Specification<T> for NotSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }
}

/// 自由文本搜索；空查询匹配全部
pub struct TextSearch<R> {
    needle: String,
    _record: PhantomData<fn(&R)>,
}

impl<R: Record> TextSearch<R> {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
            _record: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }
}

impl<R: Record> Specification<R> for TextSearch<R> {
    fn is_satisfied_by(&self, candidate: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        R::schema().searchable_fields().any(|name| {
            candidate
                .field(name)
                .is_some_and(|value| value.search_text().contains(&self.needle))
        })
    }
}

/// 分类字段精确匹配（区分大小写）；空值匹配全部
pub struct FieldEquals<R> {
    field: String,
    value: String,
    _record: PhantomData<fn(&R)>,
}

impl<R: Record> FieldEquals<R> {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Specification<R> for FieldEquals<R> {
    fn is_satisfied_by(&self, candidate: &R) -> bool {
        if self.value.is_empty() {
            return true;
        }
        candidate
            .field(&self.field)
            .is_some_and(|value| value.plain() == self.value)
    }
}

/// 取出满足规约的记录，保持原有相对顺序
pub fn filter<T, S>(records: &[T], spec: &S) -> Vec<T>
where
    T: Clone,
    S: Specification<T> + ?Sized,
{
    records
        .iter()
        .filter(|r| spec.is_satisfied_by(r))
        .cloned()
        .collect()
}
