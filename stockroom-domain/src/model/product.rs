use crate::form::FormInput;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockroom_macros::record;

/// 商品，对应远端 `products` 表 `{id, name, category, price, stock}`
#[record(prefix = "PRD")]
#[derive(Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: Option<f64>,
    pub stock: Option<i64>,
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("name", "Name").searchable().input(),
    FieldDef::text("category", "Category").searchable().input(),
    FieldDef::new("price", "Price", FieldKind::Decimal)
        .sortable()
        .input(),
    FieldDef::new("stock", "Stock", FieldKind::Integer)
        .sortable()
        .input(),
];

static SCHEMA: Schema = Schema {
    entity: "Product",
    prefix: "PRD",
    table: "products",
    collection_label: "the inventory",
    fields: FIELDS,
    facets: &[],
    default_sort: None,
};

impl Record for Product {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "name" => (&self.name).into(),
            "category" => (&self.category).into(),
            "price" => FieldValue::Decimal(self.price),
            "stock" => FieldValue::Integer(self.stock),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, _today: NaiveDate) -> Self {
        Self {
            id,
            name: form.text("name"),
            category: form.text("category"),
            price: form.float("price"),
            stock: form.int("stock"),
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("name", &mut self.name);
        form.set_text("category", &mut self.category);
        form.set_float("price", &mut self.price);
        form.set_int("stock", &mut self.stock);
    }

    fn display_name(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_row_shape() {
        let json = serde_json::json!({
            "id": "PRD-001", "name": "Desk Lamp", "category": "Home Decor",
            "price": 24.5, "stock": 40
        });
        let product: Product = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(product.id.as_str(), "PRD-001");
        assert_eq!(product.price, Some(24.5));
        assert_eq!(serde_json::to_value(&product).unwrap(), json);
    }

    #[test]
    fn null_numbers_from_remote_are_nan() {
        let json = serde_json::json!({
            "id": "PRD-002", "name": "Mystery", "category": "", "price": null, "stock": null
        });
        let product: Product = serde_json::from_value(json).unwrap();
        assert_eq!(product.price, None);
        assert_eq!(product.stock, None);
    }

    #[test]
    fn notices_use_inventory_wording() {
        let product = Product::from_form(
            RecordId::from("PRD-003"),
            &FormInput::new().with("name", "Kettle"),
            NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
        );
        assert_eq!(product.added_notice().title, "Product added");
        assert_eq!(
            product.added_notice().description,
            "Kettle has been added to the inventory."
        );
        assert_eq!(
            product.removed_notice().description,
            "Kettle has been removed from the inventory."
        );
    }
}
