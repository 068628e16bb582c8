//! 图配置

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 图配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// 顶点名称所在的属性键
    pub name_key: String,
    /// 边权重所在的属性键
    pub weight_key: String,
    /// 加权度数与加权模块度在缺少边时使用的权重
    pub fallback_weight: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name_key: "name".to_string(),
            weight_key: "weight".to_string(),
            fallback_weight: 1.0,
        }
    }
}

impl GraphConfig {
    /// 从 JSON 文本解析，缺省字段取默认值
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|_| Error::InvalidAttribute {
            key: "config".to_string(),
            expected: "GraphConfig JSON object",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json() {
        let config = GraphConfig::from_json(r#"{"weight_key": "w"}"#).unwrap();
        assert_eq!(config.weight_key, "w");
        assert_eq!(config.name_key, "name");
        assert_eq!(config.fallback_weight, 1.0);
    }

    #[test]
    fn test_bad_json() {
        assert!(GraphConfig::from_json("[1, 2]").is_err());
    }
}
