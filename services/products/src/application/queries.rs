//! Product queries

use catalog_common::{Pagination, PaginationRequest};

use crate::domain::ProductId;

/// 获取商品查询
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProductQuery {
    pub id: ProductId,
}

/// 商品列表查询
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListProductsQuery {
    pub pagination: Pagination,
}

impl ListProductsQuery {
    pub fn new(request: PaginationRequest) -> Self {
        Self {
            pagination: Pagination::from_request(request),
        }
    }
}
