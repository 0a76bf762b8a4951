//! PostgreSQL repository implementation

use async_trait::async_trait;
use catalog_common::Pagination;
use catalog_errors::{AppError, AppResult};
use sqlx::PgPool;

use crate::domain::{NewProduct, Product, ProductChanges, ProductId, ProductRepository};

use super::converters::product_from_row;
use super::rows::ProductRow;

const PRODUCT_COLUMNS: &str = "id, name, price, available, created_at, updated_at";

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&product.name)
        .bind(product.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert product: {}", e)))?;

        Ok(product_from_row(row))
    }

    async fn count_active(&self) -> AppResult<u64> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products WHERE available = TRUE")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count products: {}", e)))?;

        Ok(u64::try_from(total.0).unwrap_or(0))
    }

    async fn list_active(&self, pagination: &Pagination) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {}
            FROM products
            WHERE available = TRUE
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(to_i64(pagination.limit()))
        .bind(to_i64(pagination.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list products: {}", e)))?;

        Ok(rows.into_iter().map(product_from_row).collect())
    }

    async fn find_active_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1 AND available = TRUE",
            PRODUCT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find product: {}", e)))?;

        Ok(row.map(product_from_row))
    }

    async fn update_active(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> AppResult<Option<Product>> {
        // 单条条件语句，存在性检查与写入之间没有竞争窗口
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                name = COALESCE($2, name),
                price = COALESCE($3, price),
                updated_at = NOW()
            WHERE id = $1 AND available = TRUE
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id.0)
        .bind(changes.name.as_deref())
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update product: {}", e)))?;

        Ok(row.map(product_from_row))
    }

    async fn deactivate(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products SET
                available = FALSE,
                updated_at = NOW()
            WHERE id = $1 AND available = TRUE
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete product: {}", e)))?;

        Ok(row.map(product_from_row))
    }
}
