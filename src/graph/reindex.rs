//! 删除后的重新编号
//!
//! 删除顶点得到一张旧下标到新下标的置换表，顶点集合与边集合都按同一张表更新。

use crate::types::VertexIndex;
use std::collections::BTreeSet;

/// 旧下标 -> 新下标（`None` 表示已删除）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reindex {
    mapping: Vec<Option<VertexIndex>>,
}

impl Reindex {
    /// 根据原长度和待删除下标生成置换表
    ///
    /// 幸存者保持原有相对顺序，新下标连续为 `0..n-1`。
    pub fn new(len: usize, removed: &BTreeSet<VertexIndex>) -> Self {
        let mut next = 0;
        let mapping = (0..len)
            .map(|old| {
                if removed.contains(&old) {
                    None
                } else {
                    next += 1;
                    Some(next - 1)
                }
            })
            .collect();
        Self { mapping }
    }

    /// 恒等置换
    pub fn identity(len: usize) -> Self {
        Self {
            mapping: (0..len).map(Some).collect(),
        }
    }

    /// 查询旧下标的新位置
    pub fn get(&self, old: VertexIndex) -> Option<VertexIndex> {
        self.mapping.get(old).copied().flatten()
    }

    pub fn is_removed(&self, old: VertexIndex) -> bool {
        self.get(old).is_none()
    }

    /// 原长度
    pub fn old_len(&self) -> usize {
        self.mapping.len()
    }

    /// 删除后的长度
    pub fn new_len(&self) -> usize {
        self.mapping.iter().filter(|m| m.is_some()).count()
    }

    pub fn removed_count(&self) -> usize {
        self.old_len() - self.new_len()
    }
}
