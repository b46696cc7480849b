use bon::Builder;

/// 应用层上下文（Application Context）
///
/// 承载一次命令/查询调用的横切信息，写入日志 span：
/// - `correlation_id`：关联同一次界面操作触发的多次调用；
/// - `actor_id`：发起者标识。
///
/// ```rust
/// use stockroom_application::context::AppContext;
///
/// let ctx = AppContext::builder()
///     .correlation_id("cor-123")
///     .actor_id("admin")
///     .build();
/// assert_eq!(ctx.correlation_id.as_deref(), Some("cor-123"));
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct AppContext {
    #[builder(into)]
    pub correlation_id: Option<String>,
    #[builder(into)]
    pub actor_id: Option<String>,
}
