//! Business logic handler

use std::sync::Arc;

use catalog_common::PagedResult;
use tracing::{debug, info, warn};

use crate::domain::{Product, ProductId, ProductRepository};
use crate::error::{ProductError, ProductResult};

use super::commands::*;
use super::queries::*;

/// 商品目录
///
/// 无状态：所有状态都在仓储中，仓储通过构造函数注入。
pub struct ProductCatalog {
    repo: Arc<dyn ProductRepository>,
}

impl ProductCatalog {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }

    /// 创建商品
    pub async fn create(&self, cmd: CreateProductCommand) -> ProductResult<Product> {
        info!("Creating product: {}", cmd.name);

        cmd.validate()?;

        let product = self.repo.insert(&cmd.into_new_product()).await?;

        info!("Product created successfully: {}", product.id);
        Ok(product)
    }

    /// 分页查询可用商品
    pub async fn find_all(&self, query: ListProductsQuery) -> ProductResult<PagedResult<Product>> {
        let pagination = query.pagination;
        debug!(
            page = pagination.page(),
            limit = pagination.limit(),
            "Listing products"
        );

        let total = self.repo.count_active().await?;
        let data = self.repo.list_active(&pagination).await?;

        Ok(PagedResult::new(data, total, &pagination))
    }

    /// 获取可用商品
    pub async fn find_one(&self, query: GetProductQuery) -> ProductResult<Product> {
        debug!("Getting product: {}", query.id);

        self.repo
            .find_active_by_id(query.id)
            .await?
            .ok_or_else(|| not_found(query.id))
    }

    /// 部分更新商品
    ///
    /// 存在性检查与写入是同一条条件更新，不存在或已删除时返回 NotFound。
    pub async fn update(&self, cmd: UpdateProductCommand) -> ProductResult<Product> {
        info!("Updating product: {}", cmd.id);

        cmd.validate()?;

        let (id, payload_id, changes) = split_update(cmd);
        if let Some(payload_id) = payload_id.filter(|payload_id| *payload_id != id) {
            warn!(%id, %payload_id, "Ignoring id in update payload");
        }

        if changes.is_empty() {
            return self.find_one(GetProductQuery { id }).await;
        }

        let product = self
            .repo
            .update_active(id, &changes)
            .await?
            .ok_or_else(|| not_found(id))?;

        info!("Product updated successfully: {}", product.id);
        Ok(product)
    }

    /// 软删除商品，只把状态改为 Deleted，不删除行
    pub async fn remove(&self, cmd: DeleteProductCommand) -> ProductResult<Product> {
        info!("Removing product: {}", cmd.id);

        let product = self
            .repo
            .deactivate(cmd.id)
            .await?
            .ok_or_else(|| not_found(cmd.id))?;

        info!("Product soft-deleted: {}", product.id);
        Ok(product)
    }
}

fn not_found(id: ProductId) -> ProductError {
    warn!("Product not found: {}", id);
    ProductError::NotFound(id)
}
