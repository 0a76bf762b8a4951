//! 分页类型定义
//!
//! 基于 offset 的分页：请求参数缺省时使用默认值，非法值夹取到 1。

use serde::{Deserialize, Serialize};

/// 默认页码
pub const DEFAULT_PAGE: u64 = 1;

/// 默认每页条数
pub const DEFAULT_LIMIT: u64 = 10;

/// 客户端传入的分页请求（字段均可缺省）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PaginationRequest {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self { page, limit }
    }
}

/// 分页参数（已校验，page >= 1，limit >= 1）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// 构造分页参数，小于 1 的值夹取到 1
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// 从请求构造：缺省取默认值，非正数夹取到 1
    pub fn from_request(request: PaginationRequest) -> Self {
        let page = request.page.map_or(DEFAULT_PAGE, clamp_positive);
        let limit = request.limit.map_or(DEFAULT_LIMIT, clamp_positive);
        Self { page, limit }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// 需要跳过的行数
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<PaginationRequest> for Pagination {
    fn from(request: PaginationRequest) -> Self {
        Self::from_request(request)
    }
}

fn clamp_positive(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0).max(1)
}

/// 分页元数据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u64,
    pub last_page: u64,
}

impl PageMeta {
    /// `last_page = ceil(total / limit)`，total 为 0 时 last_page 也为 0
    pub fn new(total: u64, pagination: &Pagination) -> Self {
        Self {
            total,
            page: pagination.page(),
            last_page: total.div_ceil(pagination.limit()),
        }
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, total: u64, pagination: &Pagination) -> Self {
        Self {
            data,
            meta: PageMeta::new(total, pagination),
        }
    }

    /// 转换数据项，保留分页元数据
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
