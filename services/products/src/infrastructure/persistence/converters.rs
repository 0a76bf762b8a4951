//! 行与实体之间的转换

use crate::domain::{Product, ProductId, ProductStatus};

use super::rows::ProductRow;

pub fn product_from_row(row: ProductRow) -> Product {
    Product {
        id: ProductId(row.id),
        name: row.name,
        price: row.price,
        status: ProductStatus::from(row.available),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
