//! 排序
//!
//! 点击同一列切换方向，点击另一列切换排序键并重置为降序。
//! 排序稳定：键相等的记录保持过滤后的相对顺序。
//!
use crate::error::DomainResult;
use crate::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// 当前排序键与方向
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// 降序起步
    pub fn by(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// 列头点击
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key.to_string();
            self.direction = SortDirection::Desc;
        }
    }

    /// 就地稳定排序；排序键必须是该记录类型声明的可排序字段
    pub fn apply<R: Record>(&self, rows: &mut [R]) -> DomainResult<()> {
        R::schema().sort_key(&self.key)?;
        let key = self.key.as_str();
        rows.sort_by(|a, b| {
            let ordering = match (a.field(key), b.field(key)) {
                (Some(x), Some(y)) => x.compare(&y),
                _ => Ordering::Equal,
            };
            self.direction.orient(ordering)
        });
        Ok(())
    }
}

/// 对已过滤的记录排序；`state` 为空时保持原顺序
pub fn sort_rows<R: Record>(mut rows: Vec<R>, state: Option<&SortState>) -> DomainResult<Vec<R>> {
    if let Some(state) = state {
        state.apply(&mut rows)?;
    }
    Ok(rows)
}
