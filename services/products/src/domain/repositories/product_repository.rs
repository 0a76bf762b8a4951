//! 商品仓储接口

use async_trait::async_trait;
use catalog_common::Pagination;
use catalog_errors::AppResult;

use crate::domain::entities::{NewProduct, Product, ProductChanges};
use crate::domain::value_objects::ProductId;

/// 商品仓储接口
///
/// 除 `insert` 外，所有方法只作用于 `Active` 的商品。
/// 存储层的错误以 `AppError` 原样返回，调用方不做转换。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 插入商品，返回带生成 ID 的完整记录
    async fn insert(&self, product: &NewProduct) -> AppResult<Product>;

    /// 统计可用商品数量
    async fn count_active(&self) -> AppResult<u64>;

    /// 分页查询可用商品，按 ID 升序
    async fn list_active(&self, pagination: &Pagination) -> AppResult<Vec<Product>>;

    /// 根据 ID 查找可用商品
    async fn find_active_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// 条件更新：仅当商品存在且可用时写入，否则返回 `None`
    async fn update_active(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> AppResult<Option<Product>>;

    /// 条件软删除：仅当商品存在且可用时把状态置为 `Deleted`，否则返回 `None`
    async fn deactivate(&self, id: ProductId) -> AppResult<Option<Product>>;
}
