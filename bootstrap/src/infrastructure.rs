//! 基础设施资源管理
//!
//! 统一管理服务共享的基础设施资源

use std::time::Duration;

pub use catalog_adapter_postgres::PoolStatus;
use catalog_adapter_postgres::{PostgresConfig, check_connection, create_pool};
use catalog_config::AppConfig;
use catalog_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use crate::retry::{RetryConfig, with_retry};

/// 基础设施资源容器
///
/// 克隆开销很小，连接池内部共享
#[derive(Clone)]
pub struct Infrastructure {
    /// 应用配置
    config: AppConfig,
    /// PostgreSQL 连接池
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（带重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        Self::from_config_with_retry(config, &RetryConfig::default()).await
    }

    pub async fn from_config_with_retry(
        config: AppConfig,
        retry_config: &RetryConfig,
    ) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections)
            .with_min_connections(config.database.min_connections)
            .with_connect_timeout(Duration::from_secs(config.database.connect_timeout_secs));

        let postgres_pool = with_retry(retry_config, "PostgreSQL connection", || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        })
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    /// 获取应用配置
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取服务器配置
    pub fn server_config(&self) -> &catalog_config::ServerConfig {
        &self.config.server
    }

    /// 获取 PostgreSQL 连接池
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 获取 PostgreSQL 连接池状态
    pub fn postgres_pool_status(&self) -> PoolStatus {
        PoolStatus::of(&self.postgres_pool)
    }

    /// 检查 PostgreSQL 连接
    pub async fn check_postgres(&self) -> AppResult<()> {
        check_connection(&self.postgres_pool).await
    }
}
