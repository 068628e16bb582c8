//! 图核心模块
//!
//! 定义顶点、边、两个集合以及组合它们的图

mod collection;
mod edge;
mod graph;
mod reindex;
mod schema;
mod vertex;

pub use collection::{EdgeCollection, VertexCollection};
pub use edge::{Edge, EdgeKey};
pub use graph::{Graph, GraphStats};
pub use reindex::Reindex;
pub use schema::{AttributeSchema, Attributed};
pub use vertex::Vertex;
