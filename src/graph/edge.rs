//! 边定义

use crate::graph::schema::Attributed;
use crate::types::{Attributes, EdgeIndex, VertexIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边查找键：(源顶点名, 目标顶点名)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.source, self.target)
    }
}

/// 有向边
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// 在集合中的位置
    index: EdgeIndex,
    /// 源顶点当前下标
    source_index: VertexIndex,
    /// 目标顶点当前下标
    target_index: VertexIndex,
    /// 端点名称
    key: EdgeKey,
    /// 属性（通常含权重）
    attributes: Attributes,
}

impl Edge {
    /// 创建新边
    pub fn new(
        index: EdgeIndex,
        source_index: VertexIndex,
        target_index: VertexIndex,
        key: EdgeKey,
        attributes: Attributes,
    ) -> Self {
        Self {
            index,
            source_index,
            target_index,
            key,
            attributes,
        }
    }

    /// 获取边下标
    pub fn index(&self) -> EdgeIndex {
        self.index
    }

    pub fn source_index(&self) -> VertexIndex {
        self.source_index
    }

    pub fn target_index(&self) -> VertexIndex {
        self.target_index
    }

    /// 端点下标对
    pub fn endpoints(&self) -> (VertexIndex, VertexIndex) {
        (self.source_index, self.target_index)
    }

    pub fn source(&self) -> &str {
        &self.key.source
    }

    pub fn target(&self) -> &str {
        &self.key.target
    }

    pub fn key(&self) -> &EdgeKey {
        &self.key
    }

    /// 读取数值权重
    pub fn weight(&self, weight_key: &str) -> Option<f64> {
        self.attributes.get(weight_key).and_then(|v| v.as_f64())
    }

    pub(crate) fn reposition(
        &mut self,
        index: EdgeIndex,
        source_index: VertexIndex,
        target_index: VertexIndex,
    ) {
        self.index = index;
        self.source_index = source_index;
        self.target_index = target_index;
    }
}

impl Attributed for Edge {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}
