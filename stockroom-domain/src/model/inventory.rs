use crate::form::FormInput;
use crate::notify::Notice;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use stockroom_macros::record;

/// 数量不超过该值即为低库存
pub const LOW_STOCK_THRESHOLD: i64 = 15;

/// 库存状态，只由数量推导，从不单独存储
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }

    pub const ALL: [StockStatus; 3] = [Self::InStock, Self::LowStock, Self::OutOfStock];
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `q <= 0` 缺货，`0 < q <= 15` 低库存，其余有货。
/// 非数与两个阈值比较都为假，因此得到有货。
pub fn derive_status(quantity: Option<i64>) -> StockStatus {
    match quantity {
        Some(q) if q <= 0 => StockStatus::OutOfStock,
        Some(q) if q <= LOW_STOCK_THRESHOLD => StockStatus::LowStock,
        _ => StockStatus::InStock,
    }
}

/// 库存条目
///
/// 序列化时附带推导出的 `status`；反序列化忽略传入的 `status`。
#[record(prefix = "INV")]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub product: String,
    pub category: String,
    pub warehouse: String,
    pub quantity: Option<i64>,
    /// 新增与编辑时写入当天
    pub last_updated: NaiveDate,
}

impl InventoryItem {
    pub fn status(&self) -> StockStatus {
        derive_status(self.quantity)
    }
}

impl Serialize for InventoryItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("InventoryItem", 7)?;
        st.serialize_field("id", &self.id)?;
        st.serialize_field("product", &self.product)?;
        st.serialize_field("category", &self.category)?;
        st.serialize_field("warehouse", &self.warehouse)?;
        st.serialize_field("quantity", &self.quantity)?;
        st.serialize_field("status", &self.status())?;
        st.serialize_field("lastUpdated", &self.last_updated)?;
        st.end()
    }
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "ID").searchable(),
    FieldDef::text("product", "Product").searchable().input(),
    FieldDef::text("category", "Category").searchable().input(),
    FieldDef::text("warehouse", "Warehouse").searchable().input(),
    FieldDef::new("quantity", "Quantity", FieldKind::Integer)
        .sortable()
        .input(),
    FieldDef::text("status", "Status").searchable(),
    FieldDef::new("lastUpdated", "Last Updated", FieldKind::Date).sortable(),
];

static SCHEMA: Schema = Schema {
    entity: "Inventory item",
    prefix: "INV",
    table: "inventory",
    collection_label: "the inventory",
    fields: FIELDS,
    facets: &[],
    default_sort: None,
};

impl Record for InventoryItem {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "product" => (&self.product).into(),
            "category" => (&self.category).into(),
            "warehouse" => (&self.warehouse).into(),
            "quantity" => FieldValue::Integer(self.quantity),
            "status" => self.status().as_str().into(),
            "lastUpdated" => FieldValue::Date(self.last_updated),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, today: NaiveDate) -> Self {
        Self {
            id,
            product: form.text("product"),
            category: form.text("category"),
            warehouse: form.text("warehouse"),
            quantity: form.int("quantity"),
            last_updated: today,
        }
    }

    fn apply_form(&mut self, form: &FormInput, today: NaiveDate) {
        form.set_text("product", &mut self.product);
        form.set_text("category", &mut self.category);
        form.set_text("warehouse", &mut self.warehouse);
        form.set_int("quantity", &mut self.quantity);
        self.last_updated = today;
    }

    fn display_name(&self) -> String {
        self.product.clone()
    }

    fn updated_notice(&self) -> Notice {
        Notice::new(
            "Inventory updated",
            format!("{} has been updated successfully.", self.product),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_boundaries() {
        assert_eq!(derive_status(Some(0)), StockStatus::OutOfStock);
        assert_eq!(derive_status(Some(-3)), StockStatus::OutOfStock);
        assert_eq!(derive_status(Some(1)), StockStatus::LowStock);
        assert_eq!(derive_status(Some(15)), StockStatus::LowStock);
        assert_eq!(derive_status(Some(16)), StockStatus::InStock);
    }

    #[test]
    fn nan_quantity_reads_as_in_stock() {
        assert_eq!(derive_status(None), StockStatus::InStock);
    }

    #[test]
    fn serialized_form_carries_status() {
        let item = InventoryItem {
            id: RecordId::from("INV-002"),
            product: "Office Chair".into(),
            category: "Furniture".into(),
            warehouse: "West Distribution Center".into(),
            quantity: Some(12),
            last_updated: NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["status"], "Low Stock");
        assert_eq!(json["lastUpdated"], "2025-04-30");
        assert_eq!(json["quantity"], 12);

        // 传入的 status 被忽略，以数量为准
        let mut raw = json.clone();
        raw["status"] = "Out of Stock".into();
        let back: InventoryItem = serde_json::from_value(raw).unwrap();
        assert_eq!(back, item);
        assert_eq!(back.status(), StockStatus::LowStock);
    }

    #[test]
    fn status_is_searchable_text() {
        let item = InventoryItem {
            id: RecordId::from("INV-009"),
            product: "Hooded Sweatshirt".into(),
            category: "Clothing".into(),
            warehouse: "Central Warehouse".into(),
            quantity: Some(0),
            last_updated: NaiveDate::from_ymd_opt(2025, 4, 23).unwrap(),
        };
        assert_eq!(
            item.field("status").map(|v| v.search_text()),
            Some("out of stock".to_string())
        );
    }
}
