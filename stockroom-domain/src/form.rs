//! 表单输入
//!
//! 新增/编辑对话框提交的原始“字段名 → 文本值”映射。
//! 取值即做宽松转换，不做拒绝。
//!
use crate::coerce::{parse_float, parse_int};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormInput(BTreeMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式追加一个字段
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 文本字段；缺失时为空串
    pub fn text(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// 整数字段；缺失或无法解析时为非数
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(parse_int)
    }

    /// 小数字段；缺失或无法解析时为非数
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(parse_float)
    }

    /// 编辑时使用：字段存在才覆盖
    pub fn set_text(&self, name: &str, slot: &mut String) {
        if let Some(value) = self.get(name) {
            *slot = value.to_string();
        }
    }

    pub fn set_int(&self, name: &str, slot: &mut Option<i64>) {
        if let Some(value) = self.get(name) {
            *slot = parse_int(value);
        }
    }

    pub fn set_float(&self, name: &str, slot: &mut Option<f64>) {
        if let Some(value) = self.get(name) {
            *slot = parse_float(value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for FormInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_coerce_instead_of_failing() {
        let form = FormInput::new().with("name", "Sports2");
        assert_eq!(form.text("name"), "Sports2");
        assert_eq!(form.text("description"), "");
        assert_eq!(form.int("items"), None);
        assert_eq!(form.float("price"), None);
    }

    #[test]
    fn numeric_fields_are_parsed() {
        let form: FormInput = [("items", "42"), ("price", "9.5")].into_iter().collect();
        assert_eq!(form.int("items"), Some(42));
        assert_eq!(form.float("price"), Some(9.5));
    }

    #[test]
    fn setters_only_touch_present_fields() {
        let form = FormInput::new().with("quantity", "abc");
        let mut name = "kept".to_string();
        let mut quantity = Some(12);
        form.set_text("name", &mut name);
        form.set_int("quantity", &mut quantity);
        assert_eq!(name, "kept");
        assert_eq!(quantity, None);
    }
}
