//! 模块度
//!
//! 给定社区划分的三种模块度打分。划分由外部的社区发现算法产生，
//! 这里只负责打分。三种公式的度数与邻接定义不同，不能互相替代：
//!
//! - `networkx`：度数取关联列表长度（入出合计，当作无向），邻接取有向边是否存在
//!   （不看权重），遍历社区内全部有序点对，包括 u == v。
//! - `qyj`：度数同上，遍历社区内无序点对（u != v），相邻则计 1。
//! - `zm`：结构同 `qyj`，度数改用加权度数，相邻时累加 `get_weight(u, v, fallback)`。

use crate::error::{Error, Result};
use crate::graph::Graph;
use indexmap::IndexMap;

fn degree_of(degree: &IndexMap<String, f64>, name: &str) -> Result<f64> {
    degree
        .get(name)
        .copied()
        .ok_or_else(|| Error::VertexNotFound(name.to_string()))
}

fn unweighted_degree(graph: &Graph) -> IndexMap<String, f64> {
    graph
        .degree()
        .into_iter()
        .map(|(name, k)| (name, k as f64))
        .collect()
}

/// networkx 风格的模块度
///
/// ```text
/// Q = 1/(2m) * Σ_c Σ_{(u,v) ∈ c×c} [ A(u,v) - k(u)·k(v)/(2m) ]
/// ```
///
/// 其中 `A(u,v) = get_weight2(u, v, 0)`，u == v 时翻倍（自环约定）。
/// 无边的图返回 0。
pub fn networkx<S: AsRef<str>>(graph: &Graph, communities: &[Vec<S>]) -> Result<f64> {
    let m = graph.size();
    if m == 0 {
        return Ok(0.0);
    }

    let degree = unweighted_degree(graph);
    let norm = 1.0 / (2.0 * m as f64);
    let mut q = 0.0;

    for community in communities {
        for u in community {
            let u = u.as_ref();
            let ku = degree_of(&degree, u)?;
            for v in community {
                let v = v.as_ref();
                let kv = degree_of(&degree, v)?;
                let mut a = graph.get_weight2(u, v, 0.0);
                if u == v {
                    a *= 2.0;
                }
                q += a - ku * kv * norm;
            }
        }
    }

    Ok(norm * q)
}

/// 社区内无序点对的累加：(S, D)
///
/// S 对相邻点对累加 `score(u, v)`，D 累加 `k(u)·k(v)`，所有社区共用同一对累加器。
fn pair_sums<S, F>(
    graph: &Graph,
    communities: &[Vec<S>],
    degree: &IndexMap<String, f64>,
    score: F,
) -> Result<(f64, f64)>
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> f64,
{
    let mut s = 0.0;
    let mut d = 0.0;

    for community in communities {
        for (i, u) in community.iter().enumerate() {
            let u = u.as_ref();
            let vertex = graph.vertices().find(u)?;
            let ku = degree_of(degree, u)?;
            for v in &community[i + 1..] {
                let v = v.as_ref();
                let kv = degree_of(degree, v)?;
                if vertex.is_adjacent(v) {
                    s += score(u, v);
                }
                d += ku * kv;
            }
        }
    }

    Ok((s, d))
}

/// 无权模块度：`(S - D/2m) / 2m`
pub fn qyj<S: AsRef<str>>(graph: &Graph, communities: &[Vec<S>]) -> Result<f64> {
    let m2 = 2.0 * graph.size() as f64;
    if m2 == 0.0 {
        return Ok(0.0);
    }

    let degree = unweighted_degree(graph);
    let (s, d) = pair_sums(graph, communities, &degree, |_, _| 1.0)?;
    Ok((s - d / m2) / m2)
}

/// 加权模块度：结构同 [`qyj`]，度数取加权度数，S 累加边权
pub fn zm<S: AsRef<str>>(graph: &Graph, communities: &[Vec<S>]) -> Result<f64> {
    let m2 = 2.0 * graph.size() as f64;
    if m2 == 0.0 {
        return Ok(0.0);
    }

    let fallback = graph.config().fallback_weight;
    let degree = graph.degree_weighted();
    let (s, d) = pair_sums(graph, communities, &degree, |u, v| {
        graph.get_weight(u, v, fallback)
    })?;
    Ok((s - d / m2) / m2)
}

impl Graph {
    /// networkx 风格的模块度，见 [`networkx`]
    pub fn modularity_from_networkx<S: AsRef<str>>(&self, communities: &[Vec<S>]) -> Result<f64> {
        networkx(self, communities)
    }

    /// 无权模块度，见 [`qyj`]
    pub fn modularity_from_qyj<S: AsRef<str>>(&self, communities: &[Vec<S>]) -> Result<f64> {
        qyj(self, communities)
    }

    /// 加权模块度，见 [`zm`]
    pub fn modularity_from_zm<S: AsRef<str>>(&self, communities: &[Vec<S>]) -> Result<f64> {
        zm(self, communities)
    }
}
