//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!

use std::{fmt, str::FromStr};

use crate::error::DomainError;
use stockroom_macros::value_object;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 记录标识，形如 `CUST-001`
///
/// 序号至少补零到 3 位，超过 999 时自然增长位数。
///
/// # 示例
///
/// ```
/// use stockroom_domain::value_object::RecordId;
///
/// let id = RecordId::format("CAT", 11);
/// assert_eq!(id.as_str(), "CAT-011");
/// assert_eq!(id.prefix(), Some("CAT"));
/// assert_eq!(id.sequence(), Some(11));
/// ```
#[value_object]
#[derive(PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// 按原样包装一个标识（不做格式校验，远端数据可能不规范）
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 以前缀与序号生成标识
    pub fn format(prefix: &str, sequence: u64) -> Self {
        Self(format!("{prefix}-{sequence:03}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 前缀部分（最后一个 `-` 之前）
    pub fn prefix(&self) -> Option<&str> {
        self.0.rsplit_once('-').map(|(prefix, _)| prefix)
    }

    /// 序号部分；非数字后缀返回 `None`
    pub fn sequence(&self) -> Option<u64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, seq)| seq.parse::<u64>().ok())
    }
}

impl ValueObject for RecordId {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_value("id", "must not be empty"));
        }
        Ok(())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RecordId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Self::new(s.trim());
        id.validate()?;
        Ok(id)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 城市 + 州（供应商所在地）
#[value_object]
pub struct Location {
    pub city: String,
    pub state: String,
}

/// 完整地址（仓库所在地）
#[value_object]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// 仓库容量；数值可能为非数（`None`）
#[value_object]
pub struct Capacity {
    pub total: Option<i64>,
    pub used: Option<i64>,
}

/// 容量占用档位
#[value_object]
#[derive(Copy)]
pub enum CapacityLevel {
    #[default]
    Normal,
    Elevated,
    Critical,
}

impl Capacity {
    pub fn new(total: i64, used: i64) -> Self {
        Self {
            total: Some(total),
            used: Some(used),
        }
    }

    /// 占用百分比 `round(used / total * 100)`，半数向上取整；
    /// 总量为零或任一侧为非数时无定义
    pub fn usage_percent(&self) -> Option<i64> {
        usage_percent(self.used?, self.total?)
    }

    pub fn level(&self) -> Option<CapacityLevel> {
        self.usage_percent().map(CapacityLevel::from_percent)
    }

    pub fn available(&self) -> Option<i64> {
        Some(self.total?.saturating_sub(self.used?))
    }
}

impl CapacityLevel {
    pub fn from_percent(percent: i64) -> Self {
        if percent > 80 {
            Self::Critical
        } else if percent > 60 {
            Self::Elevated
        } else {
            Self::Normal
        }
    }
}

/// `round(used / total * 100)`
pub fn usage_percent(used: i64, total: i64) -> Option<i64> {
    if total == 0 {
        return None;
    }
    let ratio = used as f64 / total as f64 * 100.0;
    Some((ratio + 0.5).floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_format_pads_to_three_digits() {
        assert_eq!(RecordId::format("CUST", 1).as_str(), "CUST-001");
        assert_eq!(RecordId::format("CAT", 11).as_str(), "CAT-011");
        assert_eq!(RecordId::format("PRD", 1000).as_str(), "PRD-1000");
    }

    #[test]
    fn record_id_parts() {
        let id = RecordId::from("INV-015");
        assert_eq!(id.prefix(), Some("INV"));
        assert_eq!(id.sequence(), Some(15));

        let odd = RecordId::from("legacy");
        assert_eq!(odd.prefix(), None);
        assert_eq!(odd.sequence(), None);
    }

    #[test]
    fn record_id_from_str_rejects_blank() {
        assert!("  ".parse::<RecordId>().is_err());
        assert_eq!("WH-002".parse::<RecordId>().unwrap().as_str(), "WH-002");
    }

    #[test]
    fn record_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&RecordId::from("EMP-003")).unwrap();
        assert_eq!(json, "\"EMP-003\"");
        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "EMP-003");
    }

    #[test]
    fn usage_percent_rounds() {
        assert_eq!(usage_percent(35000, 50000), Some(70));
        assert_eq!(usage_percent(38000, 45000), Some(84));
        assert_eq!(usage_percent(1, 8), Some(13)); // 12.5 向上
        assert_eq!(usage_percent(10, 0), None);
    }

    #[test]
    fn capacity_with_nan_side_has_no_usage() {
        let cap = Capacity {
            total: Some(100),
            used: None,
        };
        assert_eq!(cap.usage_percent(), None);
        assert_eq!(cap.level(), None);
    }

    #[test]
    fn capacity_levels() {
        assert_eq!(Capacity::new(50000, 35000).level(), Some(CapacityLevel::Elevated));
        assert_eq!(Capacity::new(45000, 38000).level(), Some(CapacityLevel::Critical));
        assert_eq!(Capacity::new(70000, 30000).level(), Some(CapacityLevel::Normal));
        assert_eq!(CapacityLevel::from_percent(80), CapacityLevel::Elevated);
        assert_eq!(CapacityLevel::from_percent(60), CapacityLevel::Normal);
    }

    #[test]
    fn extreme_capacities_saturate() {
        let cap = Capacity::new(i64::MAX, -1);
        assert_eq!(cap.available(), Some(i64::MAX));
        assert_eq!(Capacity::new(i64::MIN, 1).available(), Some(i64::MIN));
        assert_eq!(usage_percent(i64::MAX, 1), Some(i64::MAX));
        assert_eq!(Capacity::new(i64::MAX, i64::MAX).level(), Some(CapacityLevel::Critical));
    }
}
