//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("顶点缺少名称")]
    MissingName,

    #[error("边缺少权重: {from} -> {to}")]
    MissingWeight { from: String, to: String },

    #[error("顶点已存在: {0}")]
    DuplicateName(String),

    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: {from} -> {to}")]
    EdgeNotFound { from: String, to: String },

    #[error("顶点下标越界: {index} (顶点数 {len})")]
    VertexIndexOutOfRange { index: usize, len: usize },

    #[error("属性类型错误: {key} 应为 {expected}")]
    InvalidAttribute { key: String, expected: &'static str },

    #[error("图状态不一致: {0}")]
    Inconsistent(String),
}

impl Error {
    /// 是否为创建参数错误
    ///
    /// 这类错误不改变图的状态，调用方可以修正参数后重试；
    /// 其余错误意味着查找失败，继续计算会得到错误的结果。
    pub fn is_creation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingName | Error::MissingWeight { .. } | Error::InvalidAttribute { .. }
        )
    }
}
