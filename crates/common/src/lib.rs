//! common - 通用类型和工具库

pub mod pagination;

pub use pagination::*;
