//! Proto to Domain conversions

use catalog_common::PaginationRequest;

use crate::application::{
    CreateProductCommand, DeleteProductCommand, GetProductQuery, ListProductsQuery,
    UpdateProductCommand,
};
use crate::domain::ProductId;
use crate::proto;

pub fn create_command_from_proto(req: proto::CreateProductRequest) -> CreateProductCommand {
    CreateProductCommand {
        name: req.name,
        price: req.price,
    }
}

pub fn list_query_from_proto(req: proto::FindAllProductsRequest) -> ListProductsQuery {
    ListProductsQuery::new(PaginationRequest::new(req.page, req.limit))
}

pub fn get_query_from_proto(req: proto::FindOneProductRequest) -> GetProductQuery {
    GetProductQuery {
        id: ProductId(req.id),
    }
}

// 请求体中的 id 只保留用于日志，更新目标始终是外层的 id
pub fn update_command_from_proto(req: proto::UpdateProductRequest) -> UpdateProductCommand {
    let patch = req.data.unwrap_or_default();
    UpdateProductCommand {
        id: ProductId(req.id),
        payload_id: patch.id.map(ProductId),
        name: patch.name,
        price: patch.price,
    }
}

pub fn delete_command_from_proto(req: proto::DeleteProductRequest) -> DeleteProductCommand {
    DeleteProductCommand {
        id: ProductId(req.id),
    }
}
