//! 领域层统一错误定义
//!
//! 聚焦解析、表单校验、记录查找、仓储与远端调用等最小必要集合，
//! 便于在各实现层统一转换为 `DomainError`。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化/解析 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("parse error: {reason}")]
    Parse { reason: String },
    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch { expected: String, found: String },

    // --- 记录/表单 ---
    #[error("invalid value: field={field}, reason={reason}")]
    InvalidValue { field: String, reason: String },
    #[error("not found: {entity} {id}")]
    NotFound { entity: String, id: String },

    // --- 仓储/远端 ---
    #[error("repository error: {reason}")]
    Repository { reason: String },
    #[error("remote {operation} failed: {reason}")]
    Remote {
        operation: &'static str,
        reason: String,
    },

    // --- 通知 ---
    #[error("notification error: {reason}")]
    Notification { reason: String },
}

impl DomainError {
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn remote(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

// ---- Cross-crate conversions for infrastructure convenience ----
// 允许在基础设施层直接使用 `?` 将 reqwest/chrono 等错误转换为 DomainError

#[cfg(feature = "remote")]
impl From<reqwest::Error> for DomainError {
    fn from(err: reqwest::Error) -> Self {
        let operation = if err.is_decode() {
            "decode"
        } else if err.is_timeout() {
            "timeout"
        } else {
            "request"
        };
        DomainError::Remote {
            operation,
            reason: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for DomainError {
    fn from(err: chrono::ParseError) -> Self {
        DomainError::Parse {
            reason: err.to_string(),
        }
    }
}
