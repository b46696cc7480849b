use crate::form::FormInput;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockroom_macros::record;

/// 商品分类
#[record(prefix = "CAT")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub description: String,
    /// 创建日期，编辑时保持不变
    pub created_on: NaiveDate,
    pub items: Option<i64>,
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("name", "Name").searchable().input(),
    FieldDef::text("description", "Description")
        .searchable()
        .optional_input(),
    FieldDef::new("createdOn", "Created On", FieldKind::Date).sortable(),
    FieldDef::new("items", "Items", FieldKind::Integer)
        .sortable()
        .input(),
];

static SCHEMA: Schema = Schema {
    entity: "Category",
    prefix: "CAT",
    table: "categories",
    collection_label: "the category list",
    fields: FIELDS,
    facets: &[],
    default_sort: Some("items"),
};

impl Record for Category {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "description" => (&self.description).into(),
            "createdOn" => FieldValue::Date(self.created_on),
            "items" => FieldValue::Integer(self.items),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, today: NaiveDate) -> Self {
        Self {
            id,
            name: form.text("name"),
            description: form.text("description"),
            created_on: today,
            items: form.int("items"),
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("name", &mut self.name);
        form.set_text("description", &mut self.description);
        form.set_int("items", &mut self.items);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
