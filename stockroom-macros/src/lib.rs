//! stockroom 过程宏
//!
//! - `#[record(prefix = "CUST")]`：为记录结构体注入 `id: RecordId` 字段并实现 `Entity`；
//! - `#[value_object]`：为值对象合并常用派生。
//!
use proc_macro::TokenStream;

mod derive_utils;
mod field_utils;
mod record;
mod value_object;

/// 记录宏
/// - 若缺失则追加字段 `id: ::stockroom_domain::value_object::RecordId`，并置于字段最前
/// - 自动实现 `::stockroom_domain::record::Entity`（`PREFIX`/`id`）
/// - 参数：`#[record(prefix = "CUST", debug = true|false)]`，`prefix` 必填
#[proc_macro_attribute]
pub fn record(attr: TokenStream, item: TokenStream) -> TokenStream {
    record::expand(attr, item)
}

/// 值对象宏
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并派生：Default, Clone, (Debug 可控), Serialize, Deserialize, PartialEq, Eq
/// - 参数：`#[value_object(debug = true|false)]`，默认 true
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
