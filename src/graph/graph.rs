//! 图数据结构
//!
//! 组合顶点集合与边集合：校验创建参数、转发操作，并提供度数、权重查询。

use super::collection::{EdgeCollection, VertexCollection};
use super::edge::EdgeKey;
use super::reindex::Reindex;
use crate::config::GraphConfig;
use crate::error::{Error, Result};
use crate::types::{AttributeValue, Attributes, EdgeIndex, VertexIndex};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use tracing::{debug, info, warn};

/// 图的统计快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub vertex_attributes: Vec<String>,
    pub edge_attributes: Vec<String>,
}

impl GraphStats {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// 有向图
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// 配置
    config: GraphConfig,
    /// 顶点集合
    vertices: VertexCollection,
    /// 边集合
    edges: EdgeCollection,
}

impl Graph {
    /// 创建空图
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用指定配置创建空图
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            config,
            vertices: VertexCollection::new(),
            edges: EdgeCollection::new(),
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    ///
    /// `attributes` 必须包含名称键（默认 `"name"`），其值为字符串。
    pub fn add_vertex(&mut self, mut attributes: Attributes) -> Result<VertexIndex> {
        let name = match attributes.shift_remove(&self.config.name_key) {
            Some(AttributeValue::String(name)) => name,
            Some(other) => {
                warn!(kind = other.type_name(), "顶点名称不是字符串");
                return Err(Error::InvalidAttribute {
                    key: self.config.name_key.clone(),
                    expected: "string",
                });
            }
            None => {
                warn!("顶点缺少名称，忽略");
                return Err(Error::MissingName);
            }
        };

        let index = self.vertices.add_vertex(name, attributes)?;
        debug!(index, "添加顶点");
        Ok(index)
    }

    /// 添加只有名称的顶点
    pub fn add_named_vertex(&mut self, name: &str) -> Result<VertexIndex> {
        let mut attributes = Attributes::new();
        attributes.insert(self.config.name_key.clone(), AttributeValue::from(name));
        self.add_vertex(attributes)
    }

    /// 删除一组顶点及其关联边，返回顶点下标置换表
    ///
    /// 先删顶点并重新编号，再按同一张置换表清理边。
    pub fn delete_vertices<I>(&mut self, indices: I) -> Result<Reindex>
    where
        I: IntoIterator<Item = VertexIndex>,
    {
        let indices: BTreeSet<VertexIndex> = indices.into_iter().collect();
        let reindex = self.vertices.delete(&indices)?;
        let removed_edges = self.edges.delete_for_vertices(&reindex);

        info!(
            vertices = reindex.removed_count(),
            edges = removed_edges,
            "删除顶点"
        );
        Ok(reindex)
    }

    pub fn vertices(&self) -> &VertexCollection {
        &self.vertices
    }

    /// 顶点集合的可变引用（属性操作用）
    pub fn vertices_mut(&mut self) -> &mut VertexCollection {
        &mut self.vertices
    }

    /// 获取顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// `attributes` 必须包含权重键（默认 `"weight"`）。任一端点不存在时两个集合都不变。
    pub fn add_edge(&mut self, source: &str, target: &str, attributes: Attributes) -> Result<EdgeIndex> {
        if !attributes.contains_key(&self.config.weight_key) {
            warn!(source, target, "边缺少权重，忽略");
            return Err(Error::MissingWeight {
                from: source.to_string(),
                to: target.to_string(),
            });
        }

        let s = self.vertices.index_of(source)?;
        let t = self.vertices.index_of(target)?;

        let index = self
            .edges
            .add_edge(s, t, EdgeKey::new(source, target), attributes);
        self.vertices.link(source, target)?;

        debug!(index, source, target, "添加边");
        Ok(index)
    }

    /// 添加带权边
    pub fn add_weighted_edge(&mut self, source: &str, target: &str, weight: f64) -> Result<EdgeIndex> {
        let mut attributes = Attributes::new();
        attributes.insert(self.config.weight_key.clone(), AttributeValue::Float(weight));
        self.add_edge(source, target, attributes)
    }

    pub fn edges(&self) -> &EdgeCollection {
        &self.edges
    }

    /// 边集合的可变引用（属性操作用）
    pub fn edges_mut(&mut self) -> &mut EdgeCollection {
        &mut self.edges
    }

    /// 获取边数量
    pub fn size(&self) -> usize {
        self.edges.len()
    }

    /// 当前登记的边查找键
    pub fn get_edge_keys(&self) -> HashSet<EdgeKey> {
        self.edges.keys()
    }

    // ==================== 度数与权重 ====================

    /// 每个顶点的度数（入出合计）
    pub fn degree(&self) -> IndexMap<String, usize> {
        self.vertices
            .iter()
            .map(|v| (v.name().to_string(), v.degree()))
            .collect()
    }

    /// 每个顶点的加权度数
    ///
    /// 对每个关联邻居按 `get_weight(自身, 邻居, fallback_weight)` 求和，
    /// 只有入边的邻居因此按 fallback 计。
    pub fn degree_weighted(&self) -> IndexMap<String, f64> {
        let fallback = self.config.fallback_weight;
        self.vertices
            .iter()
            .map(|v| {
                let total = v
                    .neighbors()
                    .iter()
                    .map(|n| self.get_weight(v.name(), n, fallback))
                    .sum();
                (v.name().to_string(), total)
            })
            .collect()
    }

    /// 有向边 (u, v) 的权重；边不存在或权重非数值时返回 `default`
    pub fn get_weight(&self, u: &str, v: &str, default: f64) -> f64 {
        self.edges
            .lookup(u, v)
            .and_then(|e| e.weight(&self.config.weight_key))
            .unwrap_or(default)
    }

    /// 有向边 (u, v) 存在时返回 1，否则返回 `default`
    pub fn get_weight2(&self, u: &str, v: &str, default: f64) -> f64 {
        if self.edges.contains(u, v) {
            1.0
        } else {
            default
        }
    }

    // ==================== 统计 ====================

    /// 顶点数与边数的文字描述
    pub fn summary(&self) -> String {
        format!(
            "The count of vertices is {}, and the count of edges is {}",
            self.vertices.len(),
            self.edges.len()
        )
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            vertex_count: self.vertices.len(),
            edge_count: self.edges.len(),
            vertex_attributes: self
                .vertices
                .attribute_keys()
                .into_iter()
                .map(String::from)
                .collect(),
            edge_attributes: self
                .edges
                .attribute_keys()
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    /// 检查下标、端点与邻接关系是否一致
    pub fn check_consistency(&self) -> Result<()> {
        for (i, v) in self.vertices.iter().enumerate() {
            if v.index() != i {
                return Err(Error::Inconsistent(format!(
                    "顶点 {} 下标为 {}，实际位置 {}",
                    v.name(),
                    v.index(),
                    i
                )));
            }
            if self.vertices.index_of(v.name())? != i {
                return Err(Error::Inconsistent(format!("顶点 {} 名称索引过期", v.name())));
            }
            for n in v.out_neighbors() {
                if !self.edges.contains(v.name(), n) {
                    return Err(Error::Inconsistent(format!("出邻居 {} -> {} 无对应边", v.name(), n)));
                }
            }
            for n in v.in_neighbors() {
                if !self.edges.contains(n, v.name()) {
                    return Err(Error::Inconsistent(format!("入邻居 {} -> {} 无对应边", n, v.name())));
                }
            }
        }

        let mut incident = vec![0usize; self.vertices.len()];
        for (i, e) in self.edges.iter().enumerate() {
            let s = self.vertices.index_of(e.source())?;
            let t = self.vertices.index_of(e.target())?;
            if e.index() != i || e.endpoints() != (s, t) {
                return Err(Error::Inconsistent(format!(
                    "边 {} 记录 {}@{:?}，应为 {}@{:?}",
                    e.key(),
                    e.index(),
                    e.endpoints(),
                    i,
                    (s, t)
                )));
            }
            let source = self.vertices.find(e.source())?;
            let target = self.vertices.find(e.target())?;
            if !source.out_neighbors().contains(e.target()) || !target.in_neighbors().contains(e.source()) {
                return Err(Error::Inconsistent(format!("边 {} 缺少邻接记录", e.key())));
            }
            incident[s] += 1;
            incident[t] += 1;
        }

        for v in self.vertices.iter() {
            if v.degree() != incident[v.index()] {
                return Err(Error::Inconsistent(format!(
                    "顶点 {} 关联列表长度 {}，关联边数 {}",
                    v.name(),
                    v.degree(),
                    incident[v.index()]
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
