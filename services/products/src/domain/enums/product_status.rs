//! 商品状态枚举

use serde::{Deserialize, Serialize};

/// 商品状态
///
/// 持久化为 `available` 布尔列：`Active` ⇔ `true`。
/// 只有 `Active` 的商品对查询、更新和删除可见。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductStatus {
    /// 上架
    #[default]
    Active,
    /// 已软删除（终态）
    Deleted,
}

impl ProductStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ProductStatus::Active)
    }

    /// 对应的 `available` 列值
    pub fn is_available(&self) -> bool {
        self.is_active()
    }
}

impl From<bool> for ProductStatus {
    fn from(available: bool) -> Self {
        if available {
            ProductStatus::Active
        } else {
            ProductStatus::Deleted
        }
    }
}

impl From<ProductStatus> for bool {
    fn from(status: ProductStatus) -> Self {
        status.is_available()
    }
}
