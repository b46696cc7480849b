//! 报表数据集
//!
//! 报表页使用的固定样本数据，以及从中推导的图表数据。
//! 推导一律走 [`crate::summary`]，每次调用重新计算。
//!
use crate::summary::{Share, average_by, count_by, percent_of_total, share_labels, sum_by, to_fixed};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStock {
    pub category: &'static str,
    pub in_stock: i64,
    pub low_stock: i64,
    pub out_of_stock: i64,
}

impl CategoryStock {
    pub fn total(&self) -> i64 {
        self.in_stock + self.low_stock + self.out_of_stock
    }
}

pub const INVENTORY_STOCK: [CategoryStock; 5] = [
    stock("Electronics", 128, 35, 12),
    stock("Furniture", 75, 18, 8),
    stock("Clothing", 230, 25, 5),
    stock("Books", 95, 12, 3),
    stock("Kitchen", 65, 15, 7),
];

const fn stock(category: &'static str, in_stock: i64, low_stock: i64, out_of_stock: i64) -> CategoryStock {
    CategoryStock {
        category,
        in_stock,
        low_stock,
        out_of_stock,
    }
}

pub const WAREHOUSE_DISTRIBUTION: [(&str, f64); 5] = [
    ("East Distribution Center", 35.0),
    ("West Distribution Center", 25.0),
    ("Central Warehouse", 20.0),
    ("South Distribution Center", 12.0),
    ("Northwest Facility", 8.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LowStockItem {
    pub name: &'static str,
    pub category: &'static str,
    pub current: i64,
    pub min: i64,
}

impl LowStockItem {
    /// `(min - current) / min * 100`
    pub fn deficit_percent(&self) -> Option<f64> {
        percent_of_total((self.min - self.current) as f64, self.min as f64)
    }

    /// 缺口超过一半
    pub fn is_severe(&self) -> bool {
        self.deficit_percent().is_some_and(|d| d > 50.0)
    }
}

pub const LOW_STOCK_ITEMS: [LowStockItem; 8] = [
    low("Wireless Headphones", "Electronics", 5, 10),
    low("Office Chair", "Furniture", 3, 8),
    low("Cotton T-shirt", "Clothing", 7, 15),
    low("Stainless Steel Water Bottle", "Kitchen", 4, 12),
    low("Smartphone", "Electronics", 8, 15),
    low("Coffee Table", "Furniture", 5, 10),
    low("Desk Lamp", "Electronics", 6, 12),
    low("Winter Jacket", "Clothing", 9, 20),
];

const fn low(name: &'static str, category: &'static str, current: i64, min: i64) -> LowStockItem {
    LowStockItem {
        name,
        category,
        current,
        min,
    }
}

pub const INVENTORY_VALUE: [(&str, f64); 5] = [
    ("Electronics", 245_000.0),
    ("Furniture", 185_000.0),
    ("Clothing", 125_000.0),
    ("Books", 48_000.0),
    ("Kitchen", 72_000.0),
];

pub const MONTHLY_TURNOVER: [(&str, f64); 6] = [
    ("Jan", 2.3),
    ("Feb", 2.5),
    ("Mar", 2.8),
    ("Apr", 3.1),
    ("May", 3.4),
    ("Jun", 3.7),
];

pub const CATEGORY_TURNOVER: [(&str, f64); 5] = [
    ("Electronics", 4.2),
    ("Furniture", 1.8),
    ("Clothing", 5.3),
    ("Books", 3.1),
    ("Kitchen", 3.7),
];

/// 周转率评级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnoverBand {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl TurnoverBand {
    pub fn from_rate(rate: f64) -> Self {
        if rate > 4.0 {
            Self::Excellent
        } else if rate > 3.0 {
            Self::Good
        } else if rate > 2.0 {
            Self::Average
        } else {
            Self::NeedsImprovement
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

// ---------------------------------------------------------------------------
// 库存报表
// ---------------------------------------------------------------------------

/// 三种库存状态的合计，顺序 In Stock / Low Stock / Out of Stock
pub fn stock_status_totals() -> Vec<Share> {
    let sum = |f: fn(&CategoryStock) -> i64| INVENTORY_STOCK.iter().map(f).sum::<i64>() as f64;
    vec![
        Share::new("In Stock", sum(|c| c.in_stock)),
        Share::new("Low Stock", sum(|c| c.low_stock)),
        Share::new("Out of Stock", sum(|c| c.out_of_stock)),
    ]
}

pub fn items_by_category() -> Vec<Share> {
    INVENTORY_STOCK
        .iter()
        .map(|c| Share::new(c.category, c.total() as f64))
        .collect()
}

/// 仓库分布，标签只取名称的第一个词
pub fn warehouse_distribution_labels() -> Vec<String> {
    let shares: Vec<Share> = WAREHOUSE_DISTRIBUTION
        .iter()
        .map(|(name, value)| {
            let short = name.split(' ').next().unwrap_or(name);
            Share::new(short, *value)
        })
        .collect();
    share_labels(&shares)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockCategory {
    pub category: String,
    pub count: usize,
    pub avg_deficit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowStockReport {
    pub items: usize,
    /// 平均现有量，保留一位小数
    pub average_current: String,
    pub by_category: Vec<LowStockCategory>,
}

pub fn low_stock_report(items: &[LowStockItem]) -> LowStockReport {
    let average_current = average_by(items, |i| Some(i.current as f64))
        .map_or_else(|| "NaN".to_string(), |avg| to_fixed(avg, 1));
    let by_category = count_by(items, |i| i.category)
        .into_iter()
        .map(|(category, count)| {
            let members: Vec<LowStockItem> = items
                .iter()
                .filter(|i| i.category == category)
                .copied()
                .collect();
            LowStockCategory {
                avg_deficit: average_by(&members, LowStockItem::deficit_percent),
                category,
                count,
            }
        })
        .collect();
    LowStockReport {
        items: items.len(),
        average_current,
        by_category,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRow {
    pub category: &'static str,
    pub value: f64,
    /// 占总值百分比，保留一位小数
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueReport {
    pub total: f64,
    pub average: Option<f64>,
    pub rows: Vec<ValueRow>,
}

pub fn inventory_value_report() -> ValueReport {
    let total = sum_by(&INVENTORY_VALUE, |(_, v)| Some(*v)).unwrap_or_default();
    let rows = INVENTORY_VALUE
        .iter()
        .map(|(category, value)| ValueRow {
            category,
            value: *value,
            percentage: percent_of_total(*value, total)
                .map_or_else(|| "NaN".to_string(), |p| to_fixed(p, 1)),
        })
        .collect();
    ValueReport {
        total,
        average: average_by(&INVENTORY_VALUE, |(_, v)| Some(*v)),
        rows,
    }
}

pub fn average_turnover() -> Option<String> {
    average_by(&MONTHLY_TURNOVER, |(_, rate)| Some(*rate)).map(|avg| to_fixed(avg, 1))
}

pub fn category_turnover_bands() -> Vec<(&'static str, f64, TurnoverBand)> {
    CATEGORY_TURNOVER
        .iter()
        .map(|(category, rate)| (*category, *rate, TurnoverBand::from_rate(*rate)))
        .collect()
}

// ---------------------------------------------------------------------------
// 客户报表
// ---------------------------------------------------------------------------

/// 统计起点之前已有的客户数
pub const BASELINE_CUSTOMERS: i64 = 845;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Acquisition {
    pub month: &'static str,
    pub new: i64,
    pub returning: i64,
}

pub const CUSTOMER_ACQUISITION: [Acquisition; 6] = [
    acquisition("Jan", 45, 120),
    acquisition("Feb", 52, 135),
    acquisition("Mar", 48, 142),
    acquisition("Apr", 58, 158),
    acquisition("May", 63, 172),
    acquisition("Jun", 72, 189),
];

const fn acquisition(month: &'static str, new: i64, returning: i64) -> Acquisition {
    Acquisition {
        month,
        new,
        returning,
    }
}

pub const RETENTION_RATE: [(&str, f64); 6] = [
    ("Jan", 78.0),
    ("Feb", 80.0),
    ("Mar", 82.0),
    ("Apr", 84.0),
    ("May", 85.0),
    ("Jun", 87.0),
];

pub const LIFETIME_VALUE: [(&str, f64); 3] = [
    ("Premium", 1250.0),
    ("Standard", 580.0),
    ("Basic", 320.0),
];

pub const GEOGRAPHIC_DISTRIBUTION: [(&str, f64); 10] = [
    ("California", 450.0),
    ("Texas", 380.0),
    ("New York", 320.0),
    ("Florida", 280.0),
    ("Illinois", 210.0),
    ("Washington", 190.0),
    ("Ohio", 170.0),
    ("Georgia", 160.0),
    ("North Carolina", 150.0),
    ("Michigan", 140.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyOrders {
    pub month: &'static str,
    pub orders: i64,
    pub value: f64,
}

impl MonthlyOrders {
    pub fn average_order_value(&self) -> Option<f64> {
        (self.orders != 0).then(|| self.value / self.orders as f64)
    }
}

pub const ORDER_HISTORY: [MonthlyOrders; 6] = [
    monthly("Jan", 320, 28_500.0),
    monthly("Feb", 345, 31_200.0),
    monthly("Mar", 335, 29_800.0),
    monthly("Apr", 378, 34_500.0),
    monthly("May", 410, 38_700.0),
    monthly("Jun", 435, 42_300.0),
];

const fn monthly(month: &'static str, orders: i64, value: f64) -> MonthlyOrders {
    MonthlyOrders {
        month,
        orders,
        value,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopCustomer {
    pub name: &'static str,
    pub orders: i64,
    pub total: f64,
    pub last_order: &'static str,
}

pub const TOP_CUSTOMERS: [TopCustomer; 5] = [
    top("John Smith", 15, 4250.0, "2025-04-29"),
    top("Emily Johnson", 12, 3850.0, "2025-05-02"),
    top("Michael Brown", 10, 3600.0, "2025-04-18"),
    top("Sarah Williams", 9, 3200.0, "2025-05-01"),
    top("David Miller", 8, 2900.0, "2025-04-22"),
];

const fn top(name: &'static str, orders: i64, total: f64, last_order: &'static str) -> TopCustomer {
    TopCustomer {
        name,
        orders,
        total,
        last_order,
    }
}

/// 逐月累计客户总数：基数加上截至当月的新客户
pub fn cumulative_customers(months: &[Acquisition]) -> Vec<(&'static str, i64)> {
    months
        .iter()
        .scan(BASELINE_CUSTOMERS, |total, m| {
            *total += m.new;
            Some((m.month, *total))
        })
        .collect()
}

pub fn geographic_labels() -> Vec<String> {
    let shares: Vec<Share> = GEOGRAPHIC_DISTRIBUTION
        .iter()
        .map(|(state, n)| Share::new(*state, *n))
        .collect();
    share_labels(&shares)
}

pub fn lifetime_value_labels() -> Vec<String> {
    let shares: Vec<Share> = LIFETIME_VALUE
        .iter()
        .map(|(segment, v)| Share::new(*segment, *v))
        .collect();
    share_labels(&shares)
}

// ---------------------------------------------------------------------------
// 员工报表
// ---------------------------------------------------------------------------

pub const DEPARTMENT_SHARE: [(&str, f64); 5] = [
    ("Sales", 35.0),
    ("Operations", 25.0),
    ("Admin", 20.0),
    ("Support", 15.0),
    ("HR", 5.0),
];

pub fn department_labels() -> Vec<String> {
    let shares: Vec<Share> = DEPARTMENT_SHARE
        .iter()
        .map(|(name, v)| Share::new(*name, *v))
        .collect();
    share_labels(&shares)
}
