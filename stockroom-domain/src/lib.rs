//! 库存台账领域层（stockroom-domain）
//!
//! 围绕“表格记录视图”这一模式提供领域构件：
//! - 记录与值对象建模（`record`、`value_object`、`model`），每类记录附带一份结构描述（`schema`）
//! - 视图推导：规约过滤（`specification`）、排序（`sort`）、派生汇总（`summary`）
//! - 变更：表单强制转换（`form`、`coerce`）与增删改（`mutation`）
//! - 存储：内存快照（`store`）、统一仓储协议（`persist`）与同步适配器（`sync`）
//! - 通知（`notify`）、种子数据（`seed`）与报表数据集（`reports`）
//!
//! 典型用法：
//! 1. 以种子数据或远端仓储构造 `SyncAdapter`，调用 `load` 填充快照；
//! 2. 用 `TextSearch`/`FieldEquals` 与 `SortState` 从快照推导可见行；
//! 3. 通过 `add/edit/delete` 提交表单，成功后整表重载并发出通知。
//!
pub mod clock;
pub mod coerce;
pub mod error;
pub mod form;
pub mod model;
pub mod mutation;
pub mod notify;
pub mod persist;
pub mod record;
pub mod reports;
pub mod schema;
pub mod seed;
pub mod sort;
pub mod specification;
pub mod store;
pub mod summary;
pub mod sync;
pub mod value_object;

// 允许在本 crate 内部通过 ::stockroom_domain 进行自引用，
// 以便过程宏生成的路径在本 crate 内也能解析。
extern crate self as stockroom_domain;
