//! 商品实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::enums::ProductStatus;
use crate::domain::value_objects::ProductId;

/// 商品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub status: ProductStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }
}

/// 新建商品所需字段（ID 与状态由存储层分配）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// 商品的部分更新，`None` 表示保持原值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }

    /// 把修改应用到实体上（不涉及 ID 与状态）
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}
