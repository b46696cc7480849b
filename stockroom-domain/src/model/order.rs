use crate::form::FormInput;
use crate::notify::Notice;
use crate::record::{FieldValue, Record};
use crate::schema::{FieldDef, FieldKind, Schema};
use crate::value_object::RecordId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use stockroom_macros::{record, value_object};

/// 订单状态；表单可提交任意文本，未知值原样保留
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "Processing" => Self::Processing,
            "Completed" => Self::Completed,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 订单明细
#[value_object(eq = false)]
pub struct OrderLine {
    pub product: String,
    pub quantity: i64,
    pub price: Option<f64>,
}

impl OrderLine {
    pub fn new(product: impl Into<String>, quantity: i64, price: f64) -> Self {
        Self {
            product: product.into(),
            quantity,
            price: Some(price),
        }
    }

    pub fn subtotal(&self) -> Option<f64> {
        self.price.map(|p| p * self.quantity as f64)
    }
}

/// 订单
///
/// 新增时日期取当天，明细按总额 70%/30% 拆成两条示例行。
#[record(prefix = "ORD")]
#[derive(Serialize, Deserialize)]
pub struct Order {
    pub date: NaiveDate,
    pub customer: String,
    pub status: OrderStatus,
    pub total: Option<f64>,
    pub items: Vec<OrderLine>,
}

impl Order {
    fn sample_lines(total: Option<f64>) -> Vec<OrderLine> {
        vec![
            OrderLine {
                product: "Sample Product 1".into(),
                quantity: 1,
                price: total.map(|t| t * 0.7),
            },
            OrderLine {
                product: "Sample Product 2".into(),
                quantity: 1,
                price: total.map(|t| t * 0.3),
            },
        ]
    }

    /// 明细小计之和（与 `total` 可以不一致，示例数据即如此）
    pub fn lines_total(&self) -> Option<f64> {
        self.items.iter().map(OrderLine::subtotal).sum()
    }
}

static FIELDS: &[FieldDef] = &[
    FieldDef::text("id", "Order ID").searchable(),
    FieldDef::new("date", "Date", FieldKind::Date).sortable(),
    FieldDef::text("customer", "Customer").searchable().input(),
    FieldDef::text("status", "Status").searchable().input(),
    FieldDef::new("total", "Total", FieldKind::Decimal)
        .sortable()
        .input(),
];

static SCHEMA: Schema = Schema {
    entity: "Order",
    prefix: "ORD",
    table: "orders",
    collection_label: "the order list",
    fields: FIELDS,
    facets: &[],
    default_sort: None,
};

impl Record for Order {
    fn schema() -> &'static Schema {
        &SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => (&self.id).into(),
            "date" => FieldValue::Date(self.date),
            "customer" => (&self.customer).into(),
            "status" => self.status.as_str().into(),
            "total" => FieldValue::Decimal(self.total),
            _ => return None,
        })
    }

    fn from_form(id: RecordId, form: &FormInput, today: NaiveDate) -> Self {
        let total = form.float("total");
        Self {
            id,
            date: today,
            customer: form.text("customer"),
            status: OrderStatus::from(form.text("status")),
            total,
            items: Self::sample_lines(total),
        }
    }

    fn apply_form(&mut self, form: &FormInput, _today: NaiveDate) {
        form.set_text("customer", &mut self.customer);
        if let Some(status) = form.get("status") {
            self.status = OrderStatus::from(status);
        }
        form.set_float("total", &mut self.total);
    }

    fn display_name(&self) -> String {
        self.customer.clone()
    }

    fn added_notice(&self) -> Notice {
        Notice::new(
            "Order added",
            format!("New order for {} has been created.", self.customer),
        )
    }

    fn updated_notice(&self) -> Notice {
        Notice::new(
            "Order updated",
            format!("Order {} has been updated successfully.", self.id),
        )
    }

    fn removed_notice(&self) -> Notice {
        Notice::new("Order deleted", format!("Order {} has been removed.", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
    }

    #[test]
    fn status_roundtrips_unknown_values() {
        assert_eq!(OrderStatus::from("Completed"), OrderStatus::Completed);
        let odd = OrderStatus::from("On Hold");
        assert_eq!(odd.as_str(), "On Hold");
        assert_eq!(serde_json::to_string(&odd).unwrap(), "\"On Hold\"");
    }

    #[test]
    fn add_creates_two_sample_lines() {
        let form = FormInput::new()
            .with("customer", "Jane Roe")
            .with("status", "Pending")
            .with("total", "100");
        let order = Order::from_form(RecordId::from("ORD-006"), &form, today());
        assert_eq!(order.date, today());
        assert_eq!(order.total, Some(100.0));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].price, Some(70.0));
        assert_eq!(order.items[1].price, Some(30.0));
        assert_eq!(
            order.added_notice().description,
            "New order for Jane Roe has been created."
        );
    }

    #[test]
    fn unparseable_total_leaves_line_prices_nan() {
        let form = FormInput::new().with("customer", "X").with("total", "abc");
        let order = Order::from_form(RecordId::from("ORD-006"), &form, today());
        assert_eq!(order.total, None);
        assert!(order.items.iter().all(|l| l.price.is_none()));
        let json = serde_json::to_value(&order).unwrap();
        assert!(json["total"].is_null());
    }
}
