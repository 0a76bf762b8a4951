//! 强类型 ID 定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 商品 ID，由数据库在插入时分配
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[display("{_0}")]
pub struct ProductId(pub i32);

impl ProductId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
