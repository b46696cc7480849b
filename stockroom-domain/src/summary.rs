//! 派生汇总（Derived Aggregates）
//!
//! 所有数字都从当前快照重新计算，不缓存、不增量维护。
//! 非数（`None`）参与求和时整体为 `None`，与页面上出现 `NaN` 的行为一致。
//!
use crate::model::{Category, Employee, InventoryItem, Order, StockStatus, Supplier, Warehouse};
use crate::record::Record;
use crate::value_object::{CapacityLevel, RecordId, usage_percent};
use serde::Serialize;
use std::cmp::Ordering;

/// 一个带名字的数值，饼图/柱状图的最小单元
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub name: String,
    pub value: f64,
}

impl Share {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// 按键计数，保持键首次出现的顺序
pub fn count_by<T, K>(items: &[T], key: impl Fn(&T) -> K) -> Vec<(String, usize)>
where
    K: Into<String>,
{
    let mut buckets: Vec<(String, usize)> = Vec::new();
    for item in items {
        let k = key(item).into();
        match buckets.iter_mut().find(|(name, _)| *name == k) {
            Some((_, count)) => *count += 1,
            None => buckets.push((k, 1)),
        }
    }
    buckets
}

pub fn sum_by<T>(items: &[T], value: impl Fn(&T) -> Option<f64>) -> Option<f64> {
    items.iter().map(value).sum()
}

/// 整数求和；超出范围时饱和到 `i64::MAX`/`i64::MIN`
pub fn sum_int_by<T>(items: &[T], value: impl Fn(&T) -> Option<i64>) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |acc, item| Some(acc.saturating_add(value(item)?)))
}

/// 空集合没有平均值
pub fn average_by<T>(items: &[T], value: impl Fn(&T) -> Option<f64>) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    Some(sum_by(items, value)? / items.len() as f64)
}

/// 取键最大者；键为非数的记录不参与，并列时取先出现者
pub fn max_by_key<T, K>(items: &[T], key: impl Fn(&T) -> Option<K>) -> Option<&T>
where
    K: PartialOrd,
{
    pick(items, key, Ordering::Greater)
}

/// 取键最小者；规则同 [`max_by_key`]
pub fn min_by_key<T, K>(items: &[T], key: impl Fn(&T) -> Option<K>) -> Option<&T>
where
    K: PartialOrd,
{
    pick(items, key, Ordering::Less)
}

fn pick<T, K>(items: &[T], key: impl Fn(&T) -> Option<K>, wanted: Ordering) -> Option<&T>
where
    K: PartialOrd,
{
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let Some(k) = key(item) else { continue };
        let replace = match &best {
            None => true,
            Some((_, current)) => k.partial_cmp(current) == Some(wanted),
        };
        if replace {
            best = Some((item, k));
        }
    }
    best.map(|(item, _)| item)
}

/// `part / total * 100`；总量为零时无定义
pub fn percent_of_total(part: f64, total: f64) -> Option<f64> {
    if total == 0.0 || part.is_nan() || total.is_nan() {
        return None;
    }
    Some(part / total * 100.0)
}

/// 半数向上取整（`-2.5` 得 `-2`）
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// 定点小数文本；恰好处于中点时取较大者
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    if (scaled - scaled.trunc()).abs() == 0.5 {
        return format!("{:.*}", digits, round_half_up(scaled) / factor);
    }
    format!("{value:.digits$}")
}

/// 饼图标签：`"Sales: 35%"`
pub fn share_label(name: &str, part: f64, total: f64) -> String {
    match percent_of_total(part, total) {
        Some(percent) => format!("{name}: {}%", to_fixed(percent, 0)),
        None => format!("{name}: NaN%"),
    }
}

pub fn share_labels(shares: &[Share]) -> Vec<String> {
    let total = shares.iter().map(|s| s.value).sum::<f64>();
    shares
        .iter()
        .map(|s| share_label(&s.name, s.value, total))
        .collect()
}

/// 某字段的去重取值（字典序），用作分面选项
pub fn distinct_values<R: Record>(records: &[R], field: &str) -> Vec<String> {
    let mut values: Vec<String> = records
        .iter()
        .filter_map(|r| r.field(field))
        .map(|v| v.plain())
        .filter(|v| !v.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

// ---------------------------------------------------------------------------
// 各实体汇总
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockBreakdown {
    pub total_items: usize,
    /// 按 In Stock / Low Stock / Out of Stock 固定顺序，计数为零也保留
    pub by_status: Vec<(StockStatus, usize)>,
    pub total_quantity: Option<i64>,
}

impl StockBreakdown {
    pub fn count(&self, status: StockStatus) -> usize {
        self.by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

pub fn stock_breakdown(items: &[InventoryItem]) -> StockBreakdown {
    let by_status = StockStatus::ALL
        .iter()
        .map(|status| {
            let n = items.iter().filter(|i| i.status() == *status).count();
            (*status, n)
        })
        .collect();
    StockBreakdown {
        total_items: items.len(),
        by_status,
        total_quantity: sum_int_by(items, |i| i.quantity),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub categories: usize,
    pub total_items: Option<i64>,
    pub largest: Option<RecordId>,
}

pub fn category_totals(categories: &[Category]) -> CategoryTotals {
    CategoryTotals {
        categories: categories.len(),
        total_items: sum_int_by(categories, |c| c.items),
        largest: max_by_key(categories, |c| c.items).map(|c| c.id.clone()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseUtilization {
    pub total_capacity: Option<i64>,
    pub used_capacity: Option<i64>,
    pub overall_percent: Option<i64>,
    /// 占用比例最高的仓库
    pub most_critical: Option<RecordId>,
    pub critical: usize,
}

pub fn warehouse_utilization(warehouses: &[Warehouse]) -> WarehouseUtilization {
    let total_capacity = sum_int_by(warehouses, |w| w.capacity.total);
    let used_capacity = sum_int_by(warehouses, |w| w.capacity.used);
    let overall_percent = match (used_capacity, total_capacity) {
        (Some(used), Some(total)) => usage_percent(used, total),
        _ => None,
    };
    WarehouseUtilization {
        total_capacity,
        used_capacity,
        overall_percent,
        most_critical: max_by_key(warehouses, |w| w.usage_percent()).map(|w| w.id.clone()),
        critical: warehouses
            .iter()
            .filter(|w| w.capacity_level() == Some(CapacityLevel::Critical))
            .count(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusTotal {
    pub status: String,
    pub orders: usize,
    pub revenue: Option<f64>,
}

/// 按订单状态分组的数量与金额，状态按首次出现排序
pub fn order_totals(orders: &[Order]) -> Vec<StatusTotal> {
    count_by(orders, |o| o.status.as_str().to_string())
        .into_iter()
        .map(|(status, count)| {
            let revenue = orders
                .iter()
                .filter(|o| o.status.as_str() == status)
                .map(|o| o.total)
                .sum();
            StatusTotal {
                status,
                orders: count,
                revenue,
            }
        })
        .collect()
}

pub fn headcount_by_department(employees: &[Employee]) -> Vec<Share> {
    count_by(employees, |e| e.department.clone())
        .into_iter()
        .map(|(name, n)| Share::new(name, n as f64))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierActivity {
    pub active_orders: Option<i64>,
    pub most_active: Option<RecordId>,
}

pub fn supplier_activity(suppliers: &[Supplier]) -> SupplierActivity {
    SupplierActivity {
        active_orders: sum_int_by(suppliers, |s| s.active_orders),
        most_active: max_by_key(suppliers, |s| s.active_orders).map(|s| s.id.clone()),
    }
}
