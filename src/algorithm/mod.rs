//! 图算法模块
//!
//! 社区划分的模块度打分

pub mod modularity;
