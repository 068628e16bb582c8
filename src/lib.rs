//! SimpleGraph - 带属性的内存有向图
//!
//! 为社区划分评估设计的轻量图结构，支持：
//! - 顶点与边的动态属性，集合级属性模式自动补齐
//! - 入邻居、出邻居与关联列表的维护
//! - 删除顶点后的连续重新编号
//! - 三种模块度打分

pub mod algorithm;
pub mod config;
pub mod error;
pub mod graph;
pub mod types;

// 重导出常用类型
pub use config::GraphConfig;
pub use error::{Error, Result};
pub use graph::{
    AttributeSchema, Attributed, Edge, EdgeCollection, EdgeKey, Graph, GraphStats, Reindex, Vertex,
    VertexCollection,
};
pub use types::{attributes_from_json, AttributeValue, Attributes, NeighborKind};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
