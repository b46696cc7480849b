use serde::Serialize;

/// 数据传输对象（DTO）
///
/// 查询的输出载体，面向界面与外部系统序列化；不做 blanket impl，由各结果类型显式实现。
pub trait Dto: Serialize + Send + Sync + 'static {}

/// 列表查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPage<R> {
    pub rows: Vec<R>,
    /// 过滤前的记录总数
    pub total: usize,
}

impl<R> RecordPage<R> {
    pub fn matched(&self) -> usize {
        self.rows.len()
    }
}

impl<R: Serialize + Send + Sync + 'static> Dto for RecordPage<R> {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub field: String,
    pub values: Vec<String>,
}

impl Dto for FacetOptions {}
