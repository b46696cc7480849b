use crate::form::FormInput;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockroom_macros::record;

#[record(prefix = "EMP")]
#[derive(Serialize, Deserialize)]
pub struct Employee {
    pub name: String,
    pub position: String,
    pub department: String,
    pub email: String,
    pub phone: String,
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("name", "Name").searchable().input(),
    FieldDef::text("position", "Position").searchable().input(),
    FieldDef::text("department", "Department")
        .searchable()
        .input(),
    FieldDef::new("email", "Email", FieldKind::Email)
        .searchable()
        .input(),
    FieldDef::new("phone", "Phone", FieldKind::Tel).optional_input(),
];

static SCHEMA: Schema = Schema {
    entity: "Employee",
    prefix: "EMP",
    table: "employees",
    collection_label: "the employee list",
    fields: FIELDS,
    facets: &[],
    default_sort: None,
};

impl Record for Employee {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "position" => (&self.position).into(),
            "department" => (&self.department).into(),
            "email" => (&self.email).into(),
            "phone" => (&self.phone).into(),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, _today: NaiveDate) -> Self {
        Self {
            id,
            name: form.text("name"),
            position: form.text("position"),
            department: form.text("department"),
            email: form.text("email"),
            phone: form.text("phone"),
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("name", &mut self.name);
        form.set_text("position", &mut self.position);
        form.set_text("department", &mut self.department);
        form.set_text("email", &mut self.email);
        form.set_text("phone", &mut self.phone);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}
