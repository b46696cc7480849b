use crate::form::FormInput;
use crate::notify::Notice;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::{Location, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockroom_macros::record;

/// 供应商；表单里的 `city`/`state` 映射到嵌套的 `location`
#[record(prefix = "SUP")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: Location,
    pub active_orders: Option<i64>,
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("name", "Name").searchable().input(),
    FieldDef::new("email", "Email", FieldKind::Email)
        .searchable()
        .input(),
    FieldDef::new("phone", "Phone", FieldKind::Tel).optional_input(),
    FieldDef::text("city", "City").searchable().input(),
    FieldDef::text("state", "State").searchable().input(),
    FieldDef::new("activeOrders", "Active Orders", FieldKind::Integer)
        .sortable()
        .input(),
];

static SCHEMA: Schema = Schema {
    entity: "Supplier",
    prefix: "SUP",
    table: "suppliers",
    collection_label: "the supplier list",
    fields: FIELDS,
    facets: &[],
    default_sort: None,
};

impl Record for Supplier {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "email" => (&self.email).into(),
            "phone" => (&self.phone).into(),
            "city" => (&self.location.city).into(),
            "state" => (&self.location.state).into(),
            "activeOrders" => FieldValue::Integer(self.active_orders),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, _today: NaiveDate) -> Self {
        Self {
            id,
            name: form.text("name"),
            email: form.text("email"),
            phone: form.text("phone"),
            location: Location {
                city: form.text("city"),
                state: form.text("state"),
            },
            active_orders: form.int("activeOrders"),
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("name", &mut self.name);
        form.set_text("email", &mut self.email);
        form.set_text("phone", &mut self.phone);
        form.set_text("city", &mut self.location.city);
        form.set_text("state", &mut self.location.state);
        form.set_int("activeOrders", &mut self.active_orders);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }

    fn added_notice(&self) -> Notice {
        Notice::new(
            "Supplier added",
            format!("{} has been added to your supplier list.", self.name),
        )
    }
}
