//! 错误类型
//!
//! 参数校验错误在生成之前返回；生成本身不会失败。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopoError {
    /// 未提供参数 k
    #[error("Not enough params: expected the fat-tree parameter k")]
    MissingParameter,

    /// k 不是整数、是奇数或小于 4
    #[error("Wrong k: {value} (k must be an even integer >= 4)")]
    InvalidParameter { value: String },

    /// 自检发现不一致
    #[error("topology verification failed with {count} violation(s)")]
    Inconsistent { count: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
