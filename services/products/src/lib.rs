//! catalog-products - 商品目录服务
//!
//! 商品的创建、分页查询、按 ID 查询、部分更新与软删除。

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Proto generated code modules
pub mod catalog_product {
    pub mod v1 {
        tonic::include_proto!("catalog.product.v1");
    }
}

// Re-export for convenience
pub use catalog_product::v1 as proto;

pub const FILE_DESCRIPTOR_SET: &[u8] =
    tonic::include_file_descriptor_set!("catalog_product_descriptor");
