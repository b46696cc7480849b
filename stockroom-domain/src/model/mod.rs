//! 记录类型
//!
//! 每个文件一类记录：结构体（由 `#[record]` 注入标识）、静态结构描述与 `Record` 实现。
//! 字段以 camelCase 序列化，与远端表列名一致。
//!
mod category;
mod customer;
mod employee;
mod inventory;
mod order;
mod product;
mod supplier;
mod warehouse;

pub use category::Category;
pub use customer::Customer;
pub use employee::Employee;
pub use inventory::{InventoryItem, LOW_STOCK_THRESHOLD, StockStatus, derive_status};
pub use order::{Order, OrderLine, OrderStatus};
pub use product::Product;
pub use supplier::Supplier;
pub use warehouse::Warehouse;
