//! Service error types

use catalog_errors::{AppError, ProblemDetails, problem_type_url};
use thiserror::Error;
use tonic::{Code, Status};

use crate::domain::ProductId;

/// 商品不存在时返回给调用方的 HTTP 风格状态码
pub const NOT_FOUND_HTTP_STATUS: u16 = 400;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    /// 商品不存在或已软删除
    #[error("Product with id {0} not found")]
    NotFound(ProductId),

    /// 存储层或数据契约错误，原样透传
    #[error(transparent)]
    App(#[from] AppError),
}

impl ProductError {
    /// HTTP 风格状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::NotFound(_) => NOT_FOUND_HTTP_STATUS,
            ProductError::App(err) => err.status_code(),
        }
    }

    pub fn to_problem_details(&self) -> ProblemDetails {
        match self {
            ProductError::NotFound(_) => ProblemDetails::new(
                problem_type_url("not-found"),
                "Resource Not Found",
                NOT_FOUND_HTTP_STATUS,
                self.to_string(),
            ),
            ProductError::App(err) => err.to_problem_details(),
        }
    }
}

impl From<ProductError> for Status {
    fn from(error: ProductError) -> Self {
        match error {
            ProductError::NotFound(_) => error.to_problem_details().to_status(Code::NotFound),
            ProductError::App(err) => err.into(),
        }
    }
}

pub type ProductResult<T> = Result<T, ProductError>;
