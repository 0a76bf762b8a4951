//! 服务启动器
//!
//! 提供统一的服务启动模式

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use catalog_config::AppConfig;
use catalog_errors::AppResult;
use tonic::transport::Server;
use tonic::transport::server::Router;
use tracing::{error, info};

use crate::health::{HealthChecker, HealthServer};
use crate::infrastructure::Infrastructure;
use crate::metrics::{MetricsRecorder, spawn_pool_metrics};
use crate::runtime::{init_runtime, shutdown_signal};

/// 连接池 metrics 采集间隔
const POOL_METRICS_INTERVAL: Duration = Duration::from_secs(15);

/// 运行 gRPC 服务
///
/// 这是所有微服务的统一入口点。它负责：
/// 1. 加载 `.env` 与配置
/// 2. 初始化运行时（日志）
/// 3. 创建基础设施资源（PostgreSQL，带重试）
/// 4. 启动健康检查 HTTP 服务器与连接池 metrics 采集
/// 5. 调用用户提供的闭包注册 gRPC 服务
/// 6. 启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// run_server("config", |infra, mut server| async move {
///     let service = MyServiceImpl::new(infra.postgres_pool());
///     Ok(server.add_service(MyServiceServer::new(service)))
/// })
/// .await
/// ```
pub async fn run_server<F, Fut>(
    config_dir: &str,
    server_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure, Server) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    // 1. 加载 .env（可选）与配置
    let dotenv_path = dotenvy::dotenv().ok();
    let config = AppConfig::load(config_dir)?;

    // 2. 初始化运行时
    init_runtime(&config)?;
    if let Some(path) = dotenv_path {
        info!(path = %path.display(), "Loaded environment file");
    }

    info!("Starting {} service", config.app_name);

    // 3. 初始化 Metrics 记录器
    let metrics = Arc::new(MetricsRecorder::install()?);

    // 4. 创建基础设施（带重试）
    let infra = Infrastructure::from_config(config.clone()).await?;

    // 5. 启动连接池 metrics 采集器
    let pool_metrics_handle = spawn_pool_metrics(infra.clone(), POOL_METRICS_INTERVAL);

    // 6. 启动健康检查 HTTP 服务器
    let health_checker = Arc::new(HealthChecker::new());
    health_checker.set_infrastructure(infra.clone()).await;
    let health_server = HealthServer::new(health_checker, metrics, config.server.health_port());

    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.serve().await {
            error!("Health server error: {}", e);
        }
    });

    // 7. 构建服务地址
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // 8. 让服务注册自己的 gRPC 实现
    let router = server_builder(infra, Server::builder()).await?;

    info!(%addr, "gRPC server starting");

    // 9. 启动服务器
    router.serve_with_shutdown(addr, shutdown_signal()).await?;

    // 10. 清理
    health_handle.abort();
    pool_metrics_handle.abort();

    info!("Service stopped");

    Ok(())
}
