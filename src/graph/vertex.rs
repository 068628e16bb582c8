//! 顶点定义
//!
//! 顶点以名称作为唯一标识，下标随删除重新编号。邻居只保存名称，
//! 需要完整数据时通过所属集合查找。

use crate::graph::schema::Attributed;
use crate::types::{Attributes, NeighborKind, VertexIndex};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// 顶点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// 在集合中的位置
    index: VertexIndex,
    /// 顶点名称（集合内唯一）
    name: String,
    /// 属性
    attributes: Attributes,
    /// 关联邻居（按插入顺序，入边出边都记）
    incidence: Vec<String>,
    /// 入邻居
    in_neighbors: IndexSet<String>,
    /// 出邻居
    out_neighbors: IndexSet<String>,
}

impl Vertex {
    /// 创建新顶点
    pub fn new(index: VertexIndex, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            index,
            name: name.into(),
            attributes,
            incidence: Vec::new(),
            in_neighbors: IndexSet::new(),
            out_neighbors: IndexSet::new(),
        }
    }

    /// 获取顶点下标
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    /// 获取顶点名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 关联邻居列表
    pub fn neighbors(&self) -> &[String] {
        &self.incidence
    }

    pub fn in_neighbors(&self) -> &IndexSet<String> {
        &self.in_neighbors
    }

    pub fn out_neighbors(&self) -> &IndexSet<String> {
        &self.out_neighbors
    }

    /// 度数：关联邻居个数（入出合计）
    pub fn degree(&self) -> usize {
        self.incidence.len()
    }

    /// 无向邻接判断
    pub fn is_adjacent(&self, name: &str) -> bool {
        self.out_neighbors.contains(name) || self.in_neighbors.contains(name)
    }

    /// 记录一个邻居
    pub(crate) fn add_neighbor(&mut self, kind: NeighborKind, name: &str) {
        self.incidence.push(name.to_string());
        match kind {
            NeighborKind::In => self.in_neighbors.insert(name.to_string()),
            NeighborKind::Out => self.out_neighbors.insert(name.to_string()),
        };
    }

    /// 移除名为 `name` 的邻居的所有引用，返回是否存在过
    pub(crate) fn delete_neighbor(&mut self, name: &str) -> bool {
        let before = self.incidence.len();
        self.incidence.retain(|n| n != name);
        let removed_in = self.in_neighbors.swap_remove(name);
        let removed_out = self.out_neighbors.swap_remove(name);
        before != self.incidence.len() || removed_in || removed_out
    }
}

impl Attributed for Vertex {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AttributeValue;

    #[test]
    fn test_vertex_neighbors() {
        let mut v = Vertex::new(0, "a", Attributes::new());
        v.add_neighbor(NeighborKind::Out, "b");
        v.add_neighbor(NeighborKind::In, "c");

        assert_eq!(v.degree(), 2);
        assert_eq!(v.neighbors(), &["b".to_string(), "c".to_string()]);
        assert!(v.out_neighbors().contains("b"));
        assert!(v.in_neighbors().contains("c"));
        assert!(v.is_adjacent("b"));
        assert!(v.is_adjacent("c"));
        assert!(!v.is_adjacent("d"));
    }

    #[test]
    fn test_delete_neighbor_clears_every_view() {
        let mut v = Vertex::new(0, "a", Attributes::new());
        // 双向关联：b 同时是入邻居和出邻居
        v.add_neighbor(NeighborKind::Out, "b");
        v.add_neighbor(NeighborKind::In, "b");
        v.add_neighbor(NeighborKind::Out, "c");

        assert!(v.delete_neighbor("b"));
        assert_eq!(v.neighbors(), &["c".to_string()]);
        assert!(!v.in_neighbors().contains("b"));
        assert!(!v.out_neighbors().contains("b"));
        assert!(v.out_neighbors().contains("c"));

        assert!(!v.delete_neighbor("b"));
    }

    #[test]
    fn test_vertex_attributes() {
        let mut attrs = Attributes::new();
        attrs.insert("color".to_string(), AttributeValue::from("red"));
        let v = Vertex::new(3, "x", attrs);

        assert_eq!(v.index(), 3);
        assert_eq!(v.name(), "x");
        assert_eq!(v.attribute("color"), Some(&AttributeValue::from("red")));
        assert_eq!(v.attribute("size"), None);
    }
}
