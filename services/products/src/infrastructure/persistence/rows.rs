//! 数据库行映射结构

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// 商品数据库行
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
