//! 属性模式
//!
//! 集合级别的属性登记表。集合新增属性时，已有成员补齐默认值；
//! 新成员缺少已登记属性时，同样补齐默认值。

use crate::types::{AttributeValue, Attributes};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 携带属性映射的集合成员
pub trait Attributed {
    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// 获取属性
    fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes().get(key)
    }
}

/// 属性模式：属性键 -> 默认值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeSchema {
    defaults: IndexMap<String, AttributeValue>,
}

impl AttributeSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否已登记
    pub fn contains(&self, key: &str) -> bool {
        self.defaults.contains_key(key)
    }

    /// 已登记的属性键（按登记顺序）
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(|k| k.as_str())
    }

    /// 登记的默认值
    pub fn default_of(&self, key: &str) -> Option<&AttributeValue> {
        self.defaults.get(key)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// 登记属性并给缺少该属性的成员补默认值
    pub fn set_attribute<M: Attributed>(
        &mut self,
        key: &str,
        default: AttributeValue,
        members: &mut [M],
    ) {
        for member in members.iter_mut() {
            member
                .attributes_mut()
                .entry(key.to_string())
                .or_insert_with(|| default.clone());
        }
        self.defaults.insert(key.to_string(), default);
    }

    /// 登记属性并覆盖所有成员的值
    pub fn assign_all<M: Attributed>(&mut self, key: &str, value: AttributeValue, members: &mut [M]) {
        for member in members.iter_mut() {
            member
                .attributes_mut()
                .insert(key.to_string(), value.clone());
        }
        self.defaults.insert(key.to_string(), value);
    }

    /// 接纳新成员
    ///
    /// 先把新成员带来的新属性登记进模式（默认 `Null`，已有成员同步补齐），
    /// 再给新成员补齐它缺少的已登记属性。
    pub fn admit<M: Attributed>(&mut self, member: &mut M, existing: &mut [M]) {
        let fresh: Vec<String> = member
            .attributes()
            .keys()
            .filter(|k| !self.contains(k))
            .cloned()
            .collect();
        for key in fresh {
            self.set_attribute(&key, AttributeValue::Null, existing);
        }

        let attrs = member.attributes_mut();
        for (key, default) in &self.defaults {
            if !attrs.contains_key(key) {
                attrs.insert(key.clone(), default.clone());
            }
        }
    }
}
