//! 顶点集合与边集合
//!
//! 集合拥有全部成员，维护名称索引与属性模式，删除时按置换表重新编号。

use crate::error::{Error, Result};
use crate::graph::edge::{Edge, EdgeKey};
use crate::graph::reindex::Reindex;
use crate::graph::schema::{AttributeSchema, Attributed};
use crate::graph::vertex::Vertex;
use crate::types::{AttributeValue, Attributes, EdgeIndex, NeighborKind, VertexIndex};
use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// 顶点集合
#[derive(Debug, Clone, Default)]
pub struct VertexCollection {
    /// 按下标排列的顶点
    vertices: Vec<Vertex>,
    /// 属性模式
    schema: AttributeSchema,
    /// 名称到下标的映射
    name_to_index: HashMap<String, VertexIndex>,
}

impl VertexCollection {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加顶点，返回其下标
    pub fn add_vertex(&mut self, name: impl Into<String>, attributes: Attributes) -> Result<VertexIndex> {
        let name = name.into();
        if self.name_to_index.contains_key(&name) {
            return Err(Error::DuplicateName(name));
        }

        let index = self.vertices.len();
        let mut vertex = Vertex::new(index, name.clone(), attributes);
        self.schema.admit(&mut vertex, &mut self.vertices);

        self.vertices.push(vertex);
        self.name_to_index.insert(name, index);
        Ok(index)
    }

    /// 按名称查找顶点
    pub fn find(&self, name: &str) -> Result<&Vertex> {
        let index = self.index_of(name)?;
        Ok(&self.vertices[index])
    }

    /// 按名称查找顶点下标
    pub fn index_of(&self, name: &str) -> Result<VertexIndex> {
        self.name_to_index
            .get(name)
            .copied()
            .ok_or_else(|| Error::VertexNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    pub fn get(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// 全部顶点名称（按下标顺序）
    pub fn names(&self) -> Vec<&str> {
        self.vertices.iter().map(|v| v.name()).collect()
    }

    /// 属性模式
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn attribute_keys(&self) -> Vec<&str> {
        self.schema.keys().collect()
    }

    /// 登记集合属性，缺少该属性的顶点取默认值
    pub fn set_attribute(&mut self, key: &str, default: AttributeValue) {
        self.schema.set_attribute(key, default, &mut self.vertices);
    }

    /// 为所有顶点赋同一个值
    pub fn assign_all(&mut self, key: &str, value: AttributeValue) {
        self.schema.assign_all(key, value, &mut self.vertices);
    }

    /// 每个顶点的属性值（按下标顺序），未登记的属性返回 `None`
    pub fn values(&self, key: &str) -> Option<Vec<&AttributeValue>> {
        if !self.schema.contains(key) {
            return None;
        }
        self.vertices.iter().map(|v| v.attribute(key)).collect()
    }

    /// 设置单个顶点的属性；新属性会登记进模式，其他顶点补 `Null`
    pub fn set_vertex_attribute(&mut self, name: &str, key: &str, value: AttributeValue) -> Result<()> {
        let index = self.index_of(name)?;
        if !self.schema.contains(key) {
            self.schema
                .set_attribute(key, AttributeValue::Null, &mut self.vertices);
        }
        self.vertices[index]
            .attributes_mut()
            .insert(key.to_string(), value);
        Ok(())
    }

    /// 记录一条边 source -> target 的邻接关系
    pub(crate) fn link(&mut self, source: &str, target: &str) -> Result<()> {
        let s = self.index_of(source)?;
        let t = self.index_of(target)?;
        self.vertices[s].add_neighbor(NeighborKind::Out, target);
        self.vertices[t].add_neighbor(NeighborKind::In, source);
        Ok(())
    }

    /// 删除下标在 `indices` 中的顶点，返回置换表
    ///
    /// 任一下标越界时不做任何修改。
    pub(crate) fn delete(&mut self, indices: &BTreeSet<VertexIndex>) -> Result<Reindex> {
        let len = self.vertices.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(Error::VertexIndexOutOfRange { index, len });
        }

        // 先清理幸存者对被删顶点的引用
        for &index in indices {
            let name = self.vertices[index].name().to_string();
            let neighbors: IndexSet<String> = self.vertices[index].neighbors().iter().cloned().collect();
            for neighbor in &neighbors {
                if let Some(&ni) = self.name_to_index.get(neighbor) {
                    self.vertices[ni].delete_neighbor(&name);
                }
            }
        }
        for &index in indices {
            self.name_to_index.remove(self.vertices[index].name());
        }

        let reindex = Reindex::new(len, indices);
        let mut old = 0;
        self.vertices.retain(|_| {
            old += 1;
            !reindex.is_removed(old - 1)
        });
        for (i, vertex) in self.vertices.iter_mut().enumerate() {
            vertex.set_index(i);
            self.name_to_index.insert(vertex.name().to_string(), i);
        }

        debug!(
            removed = reindex.removed_count(),
            remaining = self.vertices.len(),
            "顶点重新编号完成"
        );
        Ok(reindex)
    }
}

impl<'a> IntoIterator for &'a VertexCollection {
    type Item = &'a Vertex;
    type IntoIter = std::slice::Iter<'a, Vertex>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.iter()
    }
}

/// 边集合
#[derive(Debug, Clone, Default)]
pub struct EdgeCollection {
    /// 按下标排列的边
    edges: Vec<Edge>,
    /// 属性模式
    schema: AttributeSchema,
    /// (源, 目标) 到下标的映射
    key_to_index: HashMap<EdgeKey, EdgeIndex>,
}

impl EdgeCollection {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加边，返回其下标
    ///
    /// 同一有序点对再次加入时，查找键指向新边。
    pub(crate) fn add_edge(
        &mut self,
        source_index: VertexIndex,
        target_index: VertexIndex,
        key: EdgeKey,
        attributes: Attributes,
    ) -> EdgeIndex {
        let index = self.edges.len();
        let mut edge = Edge::new(index, source_index, target_index, key.clone(), attributes);
        self.schema.admit(&mut edge, &mut self.edges);

        self.edges.push(edge);
        self.key_to_index.insert(key, index);
        index
    }

    /// 按有序端点名称查找边
    pub fn select(&self, source: &str, target: &str) -> Result<&Edge> {
        self.lookup(source, target)
            .ok_or_else(|| Error::EdgeNotFound {
                from: source.to_string(),
                to: target.to_string(),
            })
    }

    /// 同 `select`，不存在时返回 `None`
    pub fn lookup(&self, source: &str, target: &str) -> Option<&Edge> {
        // HashMap 的键是元组，只能构造一个完整键来查
        let key = EdgeKey::new(source, target);
        self.key_to_index.get(&key).map(|&i| &self.edges[i])
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.lookup(source, target).is_some()
    }

    pub fn get(&self, index: EdgeIndex) -> Option<&Edge> {
        self.edges.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 当前登记的全部查找键
    pub fn keys(&self) -> HashSet<EdgeKey> {
        self.key_to_index.keys().cloned().collect()
    }

    /// 属性模式
    pub fn schema(&self) -> &AttributeSchema {
        &self.schema
    }

    pub fn attribute_keys(&self) -> Vec<&str> {
        self.schema.keys().collect()
    }

    /// 登记集合属性，缺少该属性的边取默认值
    pub fn set_attribute(&mut self, key: &str, default: AttributeValue) {
        self.schema.set_attribute(key, default, &mut self.edges);
    }

    /// 为所有边赋同一个值
    pub fn assign_all(&mut self, key: &str, value: AttributeValue) {
        self.schema.assign_all(key, value, &mut self.edges);
    }

    /// 每条边的属性值（按下标顺序），未登记的属性返回 `None`
    pub fn values(&self, key: &str) -> Option<Vec<&AttributeValue>> {
        if !self.schema.contains(key) {
            return None;
        }
        self.edges.iter().map(|e| e.attribute(key)).collect()
    }

    /// 设置单条边的属性；新属性会登记进模式，其他边补 `Null`
    pub fn set_edge_attribute(
        &mut self,
        source: &str,
        target: &str,
        key: &str,
        value: AttributeValue,
    ) -> Result<()> {
        let index = self.select(source, target)?.index();
        if !self.schema.contains(key) {
            self.schema
                .set_attribute(key, AttributeValue::Null, &mut self.edges);
        }
        self.edges[index]
            .attributes_mut()
            .insert(key.to_string(), value);
        Ok(())
    }

    /// 删除端点已被删除的边，并按置换表更新幸存边的端点下标
    ///
    /// 必须在顶点集合完成重新编号之后调用，返回删除的边数。
    pub(crate) fn delete_for_vertices(&mut self, reindex: &Reindex) -> usize {
        let before = self.edges.len();
        self.edges.retain(|e| {
            !reindex.is_removed(e.source_index()) && !reindex.is_removed(e.target_index())
        });

        self.key_to_index.clear();
        for (i, edge) in self.edges.iter_mut().enumerate() {
            // retain 之后两个端点都在置换表中
            let s = reindex.get(edge.source_index()).unwrap_or(edge.source_index());
            let t = reindex.get(edge.target_index()).unwrap_or(edge.target_index());
            edge.reposition(i, s, t);
            // 重复点对保留最后加入的那条
            self.key_to_index.insert(edge.key().clone(), i);
        }

        let removed = before - self.edges.len();
        debug!(removed, remaining = self.edges.len(), "边重新编号完成");
        removed
    }
}

impl<'a> IntoIterator for &'a EdgeCollection {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(vs: &mut VertexCollection, names: &[&str]) {
        for name in names {
            vs.add_vertex(*name, Attributes::new()).unwrap();
        }
    }

    fn attrs(pairs: &[(&str, AttributeValue)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_add_and_find() {
        let mut vs = VertexCollection::new();
        named(&mut vs, &["a", "b"]);

        assert_eq!(vs.len(), 2);
        assert_eq!(vs.find("b").unwrap().index(), 1);
        assert_eq!(
            vs.find("zz").unwrap_err(),
            Error::VertexNotFound("zz".to_string())
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut vs = VertexCollection::new();
        named(&mut vs, &["a"]);
        let err = vs.add_vertex("a", Attributes::new()).unwrap_err();
        assert_eq!(err, Error::DuplicateName("a".to_string()));
        assert_eq!(vs.len(), 1);
    }

    #[test]
    fn test_schema_propagates_on_insert() {
        let mut vs = VertexCollection::new();
        vs.add_vertex("a", attrs(&[("age", AttributeValue::Int(4))]))
            .unwrap();
        vs.add_vertex("b", attrs(&[("color", "red".into())])).unwrap();

        assert_eq!(vs.find("a").unwrap().attribute("color"), Some(&AttributeValue::Null));
        assert_eq!(vs.find("b").unwrap().attribute("age"), Some(&AttributeValue::Null));
        assert_eq!(vs.attribute_keys(), vec!["age", "color"]);

        vs.set_attribute("size", AttributeValue::Int(1));
        assert!(vs
            .iter()
            .all(|v| v.attribute("size") == Some(&AttributeValue::Int(1))));
        // 之后加入的顶点也带上默认值
        vs.add_vertex("c", Attributes::new()).unwrap();
        assert_eq!(vs.find("c").unwrap().attribute("size"), Some(&AttributeValue::Int(1)));
    }

    #[test]
    fn test_values_and_single_attribute() {
        let mut vs = VertexCollection::new();
        named(&mut vs, &["a", "b"]);
        assert!(vs.values("color").is_none());

        vs.set_vertex_attribute("b", "color", "red".into()).unwrap();
        let values = vs.values("color").unwrap();
        assert_eq!(values, vec![&AttributeValue::Null, &AttributeValue::from("red")]);

        assert!(vs.set_vertex_attribute("zz", "color", "red".into()).is_err());
    }

    #[test]
    fn test_link_records_both_directions() {
        let mut vs = VertexCollection::new();
        named(&mut vs, &["a", "b"]);
        vs.link("a", "b").unwrap();

        let a = vs.find("a").unwrap();
        let b = vs.find("b").unwrap();
        assert!(a.out_neighbors().contains("b"));
        assert!(a.neighbors().contains(&"b".to_string()));
        assert!(b.in_neighbors().contains("a"));
        assert!(b.neighbors().contains(&"a".to_string()));
    }

    #[test]
    fn test_delete_renumbers_and_cleans_neighbors() {
        let mut vs = VertexCollection::new();
        named(&mut vs, &["a", "b", "c", "d"]);
        vs.link("a", "b").unwrap();
        vs.link("b", "c").unwrap();
        vs.link("d", "b").unwrap();

        let removed: BTreeSet<usize> = [1].into_iter().collect();
        let reindex = vs.delete(&removed).unwrap();

        assert_eq!(vs.names(), vec!["a", "c", "d"]);
        for (i, v) in vs.iter().enumerate() {
            assert_eq!(v.index(), i);
            assert_eq!(v.degree(), 0);
        }
        assert_eq!(vs.index_of("d").unwrap(), 2);
        assert!(!vs.contains("b"));
        assert_eq!(reindex.get(3), Some(2));
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut vs = VertexCollection::new();
        named(&mut vs, &["a", "b"]);
        let removed: BTreeSet<usize> = [0, 5].into_iter().collect();

        let err = vs.delete(&removed).unwrap_err();
        assert_eq!(err, Error::VertexIndexOutOfRange { index: 5, len: 2 });
        assert_eq!(vs.len(), 2);
    }

    #[test]
    fn test_edge_select_is_directed() {
        let mut es = EdgeCollection::new();
        es.add_edge(0, 1, EdgeKey::new("a", "b"), attrs(&[("weight", AttributeValue::Int(1))]));

        assert_eq!(es.select("a", "b").unwrap().index(), 0);
        assert!(matches!(
            es.select("b", "a"),
            Err(Error::EdgeNotFound { .. })
        ));
        assert!(es.keys().contains(&EdgeKey::new("a", "b")));
    }

    #[test]
    fn test_edge_schema_and_weightless_insert() {
        let mut es = EdgeCollection::new();
        es.add_edge(0, 1, EdgeKey::new("a", "b"), Attributes::new());
        es.add_edge(1, 2, EdgeKey::new("b", "c"), attrs(&[("weight", AttributeValue::Int(2))]));

        assert_eq!(es.select("a", "b").unwrap().attribute("weight"), Some(&AttributeValue::Null));
        assert_eq!(es.values("weight").unwrap().len(), 2);

        es.assign_all("weight", AttributeValue::Float(0.5));
        assert!(es.iter().all(|e| e.weight("weight") == Some(0.5)));
    }

    #[test]
    fn test_delete_for_vertices_uses_permutation() {
        let mut es = EdgeCollection::new();
        // a(0) -> b(1), b(1) -> c(2), c(2) -> d(3), a(0) -> d(3)
        es.add_edge(0, 1, EdgeKey::new("a", "b"), Attributes::new());
        es.add_edge(1, 2, EdgeKey::new("b", "c"), Attributes::new());
        es.add_edge(2, 3, EdgeKey::new("c", "d"), Attributes::new());
        es.add_edge(0, 3, EdgeKey::new("a", "d"), Attributes::new());

        let removed: BTreeSet<usize> = [1].into_iter().collect();
        let reindex = Reindex::new(4, &removed);
        assert_eq!(es.delete_for_vertices(&reindex), 2);

        assert_eq!(es.len(), 2);
        let cd = es.select("c", "d").unwrap();
        assert_eq!((cd.index(), cd.endpoints()), (0, (1, 2)));
        let ad = es.select("a", "d").unwrap();
        assert_eq!((ad.index(), ad.endpoints()), (1, (0, 2)));
        assert!(!es.contains("a", "b"));
    }

    #[test]
    fn test_repeated_pair_overwrites_lookup() {
        let mut es = EdgeCollection::new();
        es.add_edge(0, 1, EdgeKey::new("a", "b"), attrs(&[("weight", AttributeValue::Int(1))]));
        es.add_edge(0, 1, EdgeKey::new("a", "b"), attrs(&[("weight", AttributeValue::Int(5))]));

        assert_eq!(es.len(), 2);
        assert_eq!(es.keys().len(), 1);
        assert_eq!(es.select("a", "b").unwrap().weight("weight"), Some(5.0));

        // 删除无关顶点后查找键仍指向最后那条
        let reindex = Reindex::new(3, &[2].into_iter().collect());
        es.delete_for_vertices(&reindex);
        assert_eq!(es.select("a", "b").unwrap().index(), 1);
    }
}
