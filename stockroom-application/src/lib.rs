//! stockroom 应用层
//!
//! - 命令/查询总线：`AddRecord`、`EditRecord`、`DeleteRecord` 与 `ListRecords`、`FacetValues`，
//!   每类记录各注册一个 [`handlers::RecordHandler`]；
//! - [`RecordView`]：一类记录的搜索、分面、排序状态，每次读取都从快照重新推导；
//! - [`Workspace`]：八类记录的同步适配器与总线的装配；
//! - 配置（`config` crate 分层加载）与日志初始化（`tracing-subscriber`）。
//!
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod telemetry;
pub mod view;
pub mod workspace;

pub use config::StockroomConfig;
pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
pub use view::RecordView;
pub use workspace::{Dashboard, Workspace};
