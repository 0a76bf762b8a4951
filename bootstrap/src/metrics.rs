//! Metrics 模块
//!
//! 提供 Prometheus metrics 导出

use std::time::Duration;

use catalog_errors::{AppError, AppResult};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::infrastructure::Infrastructure;

/// Metrics 记录器
pub struct MetricsRecorder {
    handle: PrometheusHandle,
}

impl MetricsRecorder {
    /// 安装全局 Prometheus recorder（每个进程只能安装一次）
    pub fn install() -> AppResult<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| AppError::internal(format!("Failed to install Prometheus recorder: {}", e)))?;

        Ok(Self { handle })
    }

    /// 使用已有的 handle
    pub fn from_handle(handle: PrometheusHandle) -> Self {
        Self { handle }
    }

    /// 获取 Prometheus 格式的 metrics
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// 记录 gRPC 请求
pub fn record_grpc_request(service: &str, method: &str, status: &str, duration_ms: f64) {
    let labels = [
        ("service", service.to_string()),
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];

    counter!("grpc_requests_total", &labels).increment(1);
    histogram!("grpc_request_duration_ms", &labels).record(duration_ms);
}

/// gRPC 调用结果的状态标签
pub fn grpc_status_label<T>(result: &Result<T, tonic::Status>) -> String {
    match result {
        Ok(_) => "Ok".to_string(),
        Err(status) => format!("{:?}", status.code()),
    }
}

/// 设置连接池大小
pub fn set_pool_size(pool_name: &str, size: u32) {
    let labels = [("pool", pool_name.to_string())];
    gauge!("connection_pool_size", &labels).set(f64::from(size));
}

/// 设置活跃连接数
pub fn set_active_connections(pool_name: &str, count: u32) {
    let labels = [("pool", pool_name.to_string())];
    gauge!("connection_pool_active", &labels).set(f64::from(count));
}

/// 启动连接池 metrics 采集任务
pub fn spawn_pool_metrics(infra: Infrastructure, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let status = infra.postgres_pool_status();
            set_pool_size("postgres", status.size);
            set_active_connections("postgres", status.active);
            debug!(
                size = status.size,
                idle = status.idle,
                active = status.active,
                "Collected pool metrics"
            );
        }
    })
}
