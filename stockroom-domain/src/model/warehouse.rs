use crate::form::FormInput;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::{Address, Capacity, CapacityLevel, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockroom_macros::record;

/// 仓库
///
/// 表单扁平提交 `address/city/state/zip` 与 `totalCapacity/usedCapacity`，
/// 映射到嵌套的 `location` 与 `capacity`。占用率 `usage` 只读、现算。
#[record(prefix = "WH")]
#[derive(Serialize, Deserialize)]
pub struct Warehouse {
    pub name: String,
    pub manager: String,
    pub phone: String,
    pub location: Address,
    pub capacity: Capacity,
}

impl Warehouse {
    pub fn usage_percent(&self) -> Option<i64> {
        self.capacity.usage_percent()
    }

    pub fn capacity_level(&self) -> Option<CapacityLevel> {
        self.capacity.level()
    }
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("name", "Name").searchable().input(),
    FieldDef::text("manager", "Manager").input(),
    FieldDef::new("phone", "Phone", FieldKind::Tel).optional_input(),
    FieldDef::text("address", "Address").optional_input(),
    FieldDef::text("city", "City").searchable().input(),
    FieldDef::text("state", "State").searchable().input(),
    FieldDef::text("zip", "ZIP").optional_input(),
    FieldDef::new("totalCapacity", "Total Capacity", FieldKind::Integer).input(),
    FieldDef::new("usedCapacity", "Used Capacity", FieldKind::Integer).input(),
    FieldDef::new("usage", "Usage", FieldKind::Integer).sortable(),
];

static SCHEMA: Schema = Schema {
    entity: "Warehouse",
    prefix: "WH",
    table: "warehouses",
    collection_label: "the warehouse list",
    fields: FIELDS,
    facets: &["state"],
    default_sort: None,
};

impl Record for Warehouse {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "manager" => (&self.manager).into(),
            "phone" => (&self.phone).into(),
            "address" => (&self.location.address).into(),
            "city" => (&self.location.city).into(),
            "state" => (&self.location.state).into(),
            "zip" => (&self.location.zip).into(),
            "totalCapacity" => FieldValue::Integer(self.capacity.total),
            "usedCapacity" => FieldValue::Integer(self.capacity.used),
            "usage" => FieldValue::Integer(self.usage_percent()),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, _today: NaiveDate) -> Self {
        Self {
            id,
            name: form.text("name"),
            manager: form.text("manager"),
            phone: form.text("phone"),
            location: Address {
                address: form.text("address"),
                city: form.text("city"),
                state: form.text("state"),
                zip: form.text("zip"),
            },
            capacity: Capacity {
                total: form.int("totalCapacity"),
                used: form.int("usedCapacity"),
            },
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("name", &mut self.name);
        form.set_text("manager", &mut self.manager);
        form.set_text("phone", &mut self.phone);
        form.set_text("address", &mut self.location.address);
        form.set_text("city", &mut self.location.city);
        form.set_text("state", &mut self.location.state);
        form.set_text("zip", &mut self.location.zip);
        form.set_int("totalCapacity", &mut self.capacity.total);
        form.set_int("usedCapacity", &mut self.capacity.used);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
