//! catalog-errors - 统一错误处理
//!
//! 基于 RFC 7807 Problem Details 规范

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PROBLEM_BASE_URL: &str = "https://api.catalog.local/problems";

/// 应用错误类型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// 转换为 HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
            Self::Unavailable(_) => 503,
        }
    }

    /// 转换为 gRPC 状态码
    pub fn grpc_code(&self) -> tonic::Code {
        match self {
            Self::NotFound(_) => tonic::Code::NotFound,
            Self::Validation(_) => tonic::Code::InvalidArgument,
            Self::Conflict(_) => tonic::Code::AlreadyExists,
            Self::Internal(_) => tonic::Code::Internal,
            Self::Database(_) => tonic::Code::Internal,
            Self::Unavailable(_) => tonic::Code::Unavailable,
        }
    }

    /// 转换为 Problem Details
    pub fn to_problem_details(&self) -> ProblemDetails {
        ProblemDetails {
            r#type: self.problem_type(),
            title: self.problem_title().to_string(),
            status: self.status_code(),
            detail: self.to_string(),
            instance: None,
        }
    }

    fn problem_type(&self) -> String {
        let slug = match self {
            Self::NotFound(_) => "not-found",
            Self::Validation(_) => "validation",
            Self::Conflict(_) => "conflict",
            Self::Internal(_) => "internal",
            Self::Database(_) => "database",
            Self::Unavailable(_) => "unavailable",
        };
        problem_type_url(slug)
    }

    fn problem_title(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Resource Not Found",
            Self::Validation(_) => "Validation Error",
            Self::Conflict(_) => "Conflict",
            Self::Internal(_) => "Internal Server Error",
            Self::Database(_) => "Database Error",
            Self::Unavailable(_) => "Service Unavailable",
        }
    }
}

impl From<AppError> for tonic::Status {
    fn from(err: AppError) -> Self {
        tonic::Status::new(err.grpc_code(), err.to_string())
    }
}

/// 拼接 problem type URL
pub fn problem_type_url(slug: &str) -> String {
    format!("{}/{}", PROBLEM_BASE_URL, slug)
}

/// RFC 7807 Problem Details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(
        r#type: impl Into<String>,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            r#type: r#type.into(),
            title: title.into(),
            status,
            detail: detail.into(),
            instance: None,
        }
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// 转换为 gRPC Status，消息取 `detail`，Problem Details JSON 放入 details
    pub fn to_status(&self, code: tonic::Code) -> tonic::Status {
        match serde_json::to_vec(self) {
            Ok(body) => tonic::Status::with_details(
                code,
                self.detail.clone(),
                tonic::codegen::Bytes::from(body),
            ),
            Err(_) => tonic::Status::new(code, self.detail.clone()),
        }
    }

    /// 从 gRPC Status 的 details 中解析 Problem Details
    pub fn from_status(status: &tonic::Status) -> Option<Self> {
        serde_json::from_slice(status.details()).ok()
    }
}

/// Result 类型别名
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::validation("x").status_code(), 400);
        assert_eq!(AppError::database("x").status_code(), 500);
        assert_eq!(AppError::unavailable("x").status_code(), 503);
    }

    #[test]
    fn test_grpc_status_keeps_message() {
        let status: tonic::Status = AppError::database("connection reset").into();
        assert_eq!(status.code(), tonic::Code::Internal);
        assert_eq!(status.message(), "Database error: connection reset");
    }

    #[test]
    fn test_problem_details() {
        let problem = AppError::validation("name must not be empty").to_problem_details();
        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, "Validation Error");
        assert_eq!(problem.r#type, "https://api.catalog.local/problems/validation");
        assert_eq!(problem.detail, "Validation error: name must not be empty");
    }

    #[test]
    fn test_problem_details_round_trip_through_status() {
        let problem = ProblemDetails::new(problem_type_url("not-found"), "Resource Not Found", 400, "gone")
            .with_instance("/catalog.product.v1.ProductService/FindOneProduct");
        let status = problem.to_status(tonic::Code::NotFound);

        assert_eq!(status.code(), tonic::Code::NotFound);
        assert_eq!(status.message(), "gone");
        assert_eq!(ProblemDetails::from_status(&status), Some(problem));
    }

    #[test]
    fn test_instance_is_skipped_when_absent() {
        let problem = ProblemDetails::new("t", "title", 400, "detail");
        let json = serde_json::to_string(&problem).unwrap();
        assert!(!json.contains("instance"));
    }
}
