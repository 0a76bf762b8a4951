//! Product commands
//!
//! 命令即数据契约：进入 `ProductCatalog` 之前先调用 `validate()`。

use catalog_errors::{AppError, AppResult};

use crate::domain::{NewProduct, ProductChanges, ProductId};

/// 商品名称最大长度
pub const MAX_NAME_LENGTH: usize = 255;

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() {
        return Err(AppError::validation("price must be a finite number"));
    }
    if price < 0.0 {
        return Err(AppError::validation("price must not be negative"));
    }
    Ok(())
}

/// 创建商品命令
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductCommand {
    pub name: String,
    pub price: f64,
}

impl CreateProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
        }
    }
}

/// 更新商品命令
///
/// `payload_id` 是请求体里携带的 ID，只用于日志，永远不会作为更新目标。
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub payload_id: Option<ProductId>,
    pub name: Option<String>,
    pub price: Option<f64>,
}

impl UpdateProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

/// 删除商品命令（软删除）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteProductCommand {
    pub id: ProductId,
}

/// 拆分更新命令：目标 ID、被丢弃的请求体 ID、字段修改
pub(crate) fn split_update(cmd: UpdateProductCommand) -> (ProductId, Option<ProductId>, ProductChanges) {
    let UpdateProductCommand {
        id,
        payload_id,
        name,
        price,
    } = cmd;
    (id, payload_id, ProductChanges { name, price })
}
