//! 声明式记录结构（Schema）
//!
//! 每类记录一份静态描述：字段名、标签、类型，以及是否参与搜索、排序与表单。
//! 新增/编辑表单、搜索谓词、排序键校验均从这里取字段清单。
//!
use crate::coerce::{parse_float, parse_int};
use crate::error::{DomainError, DomainResult};
use crate::form::FormInput;
use chrono::NaiveDate;

/// 字段类型，决定表单输入如何转换以及排序如何比较
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
    Integer,
    Decimal,
    Date,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Decimal)
    }
}

/// 单个字段描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// 参与自由文本搜索
    pub searchable: bool,
    /// 可作为排序键
    pub sortable: bool,
    /// 出现在新增/编辑表单中
    pub form: bool,
    /// 严格模式下新增时必填
    pub required: bool,
}

impl FieldDef {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            searchable: false,
            sortable: false,
            form: false,
            required: false,
        }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub const fn searchable(self) -> Self {
        Self {
            searchable: true,
            ..self
        }
    }

    pub const fn sortable(self) -> Self {
        Self {
            sortable: true,
            ..self
        }
    }

    /// 表单字段，严格模式下必填
    pub const fn input(self) -> Self {
        Self {
            form: true,
            required: true,
            ..self
        }
    }

    /// 表单字段，可留空
    pub const fn optional_input(self) -> Self {
        Self {
            form: true,
            required: false,
            ..self
        }
    }
}

/// 一类记录的完整描述
#[derive(Debug)]
pub struct Schema {
    /// 单数名，用于通知标题，如 `Customer`
    pub entity: &'static str,
    pub prefix: &'static str,
    /// 远端表名，同时作为复数名，如 `customers`
    pub table: &'static str,
    /// 通知文案里的集合名，如 `the customer list`
    pub collection_label: &'static str,
    pub fields: &'static [FieldDef],
    /// 精确匹配的分类筛选字段（下拉框）
    pub facets: &'static [&'static str],
    /// 视图初始排序键
    pub default_sort: Option<&'static str>,
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.searchable).map(|f| f.name)
    }

    pub fn sortable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.sortable).map(|f| f.name)
    }

    pub fn form_fields(&self) -> impl Iterator<Item = &FieldDef> + '_ {
        self.fields.iter().filter(|f| f.form)
    }

    pub fn is_facet(&self, name: &str) -> bool {
        self.facets.contains(&name)
    }

    /// 校验排序键：必须存在且标记为可排序
    pub fn sort_key(&self, name: &str) -> DomainResult<&FieldDef> {
        match self.field(name) {
            Some(def) if def.sortable => Ok(def),
            Some(_) => Err(DomainError::invalid_value(
                name,
                format!("{} cannot be sorted by this field", self.entity),
            )),
            None => Err(DomainError::invalid_value(
                name,
                format!("unknown {} field", self.entity),
            )),
        }
    }

    /// 严格模式：新增时检查必填项与数值格式
    pub fn check_create(&self, form: &FormInput) -> DomainResult<()> {
        for def in self.form_fields() {
            match form.get(def.name) {
                None => {
                    if def.required {
                        return Err(DomainError::invalid_value(def.name, "is required"));
                    }
                }
                Some(value) => check_value(def, value)?,
            }
        }
        Ok(())
    }

    /// 严格模式：编辑时仅检查出现的字段
    pub fn check_update(&self, form: &FormInput) -> DomainResult<()> {
        for (name, value) in form.iter() {
            if let Some(def) = self.field(name).filter(|d| d.form) {
                check_value(def, value)?;
            }
        }
        Ok(())
    }
}

fn check_value(def: &FieldDef, value: &str) -> DomainResult<()> {
    if def.required && value.trim().is_empty() {
        return Err(DomainError::invalid_value(def.name, "is required"));
    }
    let ok = match def.kind {
        FieldKind::Integer => parse_int(value).is_some(),
        FieldKind::Decimal => parse_float(value).is_some(),
        FieldKind::Date => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok(),
        FieldKind::Email => value.is_empty() || value.contains('@'),
        FieldKind::Text | FieldKind::Tel => true,
    };
    if ok {
        Ok(())
    } else {
        Err(DomainError::invalid_value(
            def.name,
            format!("{value:?} is not a valid {}", def.label.to_lowercase()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: &[FieldDef] = &[
        FieldDef::text("id", "ID").searchable(),
        FieldDef::text("name", "Name").searchable().input(),
        FieldDef::new("email", "Email", FieldKind::Email).optional_input(),
        FieldDef::new("items", "Items", FieldKind::Integer)
            .sortable()
            .input(),
    ];

    static SCHEMA: Schema = Schema {
        entity: "Widget",
        prefix: "WID",
        table: "widgets",
        collection_label: "the widget list",
        fields: FIELDS,
        facets: &[],
        default_sort: Some("items"),
    };

    #[test]
    fn field_lists() {
        assert_eq!(SCHEMA.searchable_fields().collect::<Vec<_>>(), ["id", "name"]);
        assert_eq!(SCHEMA.sortable_fields().collect::<Vec<_>>(), ["items"]);
        assert_eq!(SCHEMA.form_fields().count(), 3);
    }

    #[test]
    fn sort_key_rejects_unknown_and_unsortable() {
        assert!(SCHEMA.sort_key("items").is_ok());
        assert!(matches!(
            SCHEMA.sort_key("name"),
            Err(DomainError::InvalidValue { .. })
        ));
        assert!(matches!(
            SCHEMA.sort_key("weight"),
            Err(DomainError::InvalidValue { .. })
        ));
    }

    #[test]
    fn strict_create_requires_fields_and_numbers() {
        let ok = FormInput::new().with("name", "Bolt").with("items", "3");
        assert!(SCHEMA.check_create(&ok).is_ok());

        let missing = FormInput::new().with("items", "3");
        assert!(SCHEMA.check_create(&missing).is_err());

        let bad_number = FormInput::new().with("name", "Bolt").with("items", "many");
        assert!(SCHEMA.check_create(&bad_number).is_err());

        let bad_email = ok.clone().with("email", "nowhere");
        assert!(SCHEMA.check_create(&bad_email).is_err());
    }

    #[test]
    fn strict_update_only_checks_present_fields() {
        assert!(SCHEMA.check_update(&FormInput::new()).is_ok());
        assert!(SCHEMA
            .check_update(&FormInput::new().with("items", "x"))
            .is_err());
    }
}
