//! 目录筛选错误模型

use thiserror::Error;
use utils_common::CodecError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// 目录筛选错误
///
/// 价格越界不属于错误，只会得到空的可见集合。
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 未知的筛选维度、排序方式或格式错误的参数
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 目录索引解析失败
    #[error("目录索引解析失败: {0}")]
    Codec(#[from] CodecError),

    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
