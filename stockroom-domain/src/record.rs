//! 记录（Record）基础抽象
//!
//! `Entity` 由 `#[record]` 宏生成，提供前缀与标识；
//! `Record` 由各记录类型手写，提供结构描述、统一字段访问与表单映射。
//!
use crate::form::FormInput;
use crate::notify::Notice;
use crate::schema::Schema;
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use std::cmp::Ordering;

/// 具备唯一标识的实体
pub trait Entity: Clone + Send + Sync + 'static {
    /// 标识前缀，如 `CUST`
    const PREFIX: &'static str;

    fn id(&self) -> &RecordId;
}

/// 可被视图引擎搜索、排序、变更的记录
pub trait Record: Entity + Serialize + DeserializeOwned {
    fn schema() -> &'static Schema;

    /// 按字段名读取值；未知字段返回 `None`
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// 由新增表单构造记录（仅做宽松转换）
    fn from_form(id: RecordId, form: &FormInput, today: NaiveDate) -> Self;

    /// 以编辑表单覆盖出现的字段；标识与创建日期不变
    fn apply_form(&mut self, form: &FormInput, today: NaiveDate);

    /// 通知文案中使用的名称
    fn display_name(&self) -> String;

    fn added_notice(&self) -> Notice {
        let schema = Self::schema();
        Notice::new(
            format!("{} added", schema.entity),
            format!(
                "{} has been added to {}.",
                self.display_name(),
                schema.collection_label
            ),
        )
    }

    fn updated_notice(&self) -> Notice {
        Notice::new(
            format!("{} updated", Self::schema().entity),
            format!("{} has been updated successfully.", self.display_name()),
        )
    }

    fn removed_notice(&self) -> Notice {
        let schema = Self::schema();
        Notice::new(
            format!("{} deleted", schema.entity),
            format!(
                "{} has been removed from {}.",
                self.display_name(),
                schema.collection_label
            ),
        )
    }
}

/// 统一字段值
///
/// 数值字段的 `None` 表示非数（表单里填了无法解析的内容）。
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(Option<i64>),
    Decimal(Option<f64>),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// 原样的字符串形式，供分类筛选做精确匹配
    pub fn plain(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(Some(n)) => n.to_string(),
            Self::Decimal(Some(x)) => x.to_string(),
            Self::Integer(None) | Self::Decimal(None) => "NaN".to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// 小写字符串形式，供自由文本搜索
    pub fn search_text(&self) -> String {
        self.plain().to_lowercase()
    }

    /// 排序比较：数值按大小、日期按日历、文本按字典序；
    /// 非数之间相等，且在升序中排在所有数值之后。类型不同视为相等。
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => nan_last(a.as_ref(), b.as_ref(), Ord::cmp),
            (Self::Decimal(a), Self::Decimal(b)) => {
                nan_last(a.as_ref(), b.as_ref(), |x, y| x.total_cmp(y))
            }
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

fn nan_last<T>(a: Option<&T>, b: Option<&T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<&RecordId> for FieldValue {
    fn from(value: &RecordId) -> Self {
        Self::Text(value.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_text_is_lowercased() {
        assert_eq!(FieldValue::text("Houston").search_text(), "houston");
        assert_eq!(FieldValue::Integer(None).search_text(), "nan");
        assert_eq!(FieldValue::Decimal(Some(350.0)).search_text(), "350");
        assert_eq!(FieldValue::Decimal(Some(125.5)).search_text(), "125.5");
    }

    #[test]
    fn nan_sorts_after_numbers() {
        let nan = FieldValue::Integer(None);
        let five = FieldValue::Integer(Some(5));
        assert_eq!(five.compare(&nan), Ordering::Less);
        assert_eq!(nan.compare(&five), Ordering::Greater);
        assert_eq!(nan.compare(&FieldValue::Integer(None)), Ordering::Equal);
    }

    #[test]
    fn dates_compare_by_calendar() {
        let a = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default());
        let b = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 1, 24).unwrap_or_default());
        assert_eq!(a.compare(&b), Ordering::Less);
    }
}
