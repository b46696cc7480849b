use crate::form::FormInput;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, Schema};
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockroom_macros::record;

#[record(prefix = "CUST")]
#[derive(Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub city: String,
    pub state: String,
    pub zipcode: String,
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("name", "Name").searchable().input(),
    FieldDef::text("city", "City").searchable().input(),
    FieldDef::text("state", "State").searchable().input(),
    FieldDef::text("zipcode", "Zip Code").optional_input(),
];

static SCHEMA: Schema = Schema {
    entity: "Customer",
    prefix: "CUST",
    table: "customers",
    collection_label: "the customer list",
    fields: FIELDS,
    facets: &["state"],
    default_sort: None,
};

impl Record for Customer {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "city" => (&self.city).into(),
            "state" => (&self.state).into(),
            "zipcode" => (&self.zipcode).into(),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, _today: NaiveDate) -> Self {
        Self {
            id,
            name: form.text("name"),
            city: form.text("city"),
            state: form.text("state"),
            zipcode: form.text("zipcode"),
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("name", &mut self.name);
        form.set_text("city", &mut self.city);
        form.set_text("state", &mut self.state);
        form.set_text("zipcode", &mut self.zipcode);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
