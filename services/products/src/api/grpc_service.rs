//! gRPC service implementation

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use catalog_bootstrap::{grpc_status_label, record_grpc_request};
use tonic::{Request, Response, Status};

use crate::application::ProductCatalog;
use crate::proto::product_service_server::ProductService;
use crate::proto::*;

use super::conversions::*;
use super::proto_converters::*;

const SERVICE_NAME: &str = "ProductService";

pub struct ProductServiceImpl {
    catalog: Arc<ProductCatalog>,
}

impl ProductServiceImpl {
    pub fn new(catalog: Arc<ProductCatalog>) -> Self {
        Self { catalog }
    }
}

/// 记录调用耗时与结果状态
async fn observed<T, Fut>(method: &'static str, call: Fut) -> Result<Response<T>, Status>
where
    Fut: Future<Output = Result<T, Status>>,
{
    let started = Instant::now();
    let result = call.await;
    record_grpc_request(
        SERVICE_NAME,
        method,
        &grpc_status_label(&result),
        started.elapsed().as_secs_f64() * 1000.0,
    );
    result.map(Response::new)
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let cmd = create_command_from_proto(request.into_inner());

        observed("CreateProduct", async {
            let product = self.catalog.create(cmd).await?;
            Ok::<_, Status>(product_to_proto(&product))
        })
        .await
    }

    async fn find_all_products(
        &self,
        request: Request<FindAllProductsRequest>,
    ) -> Result<Response<FindAllProductsResponse>, Status> {
        let query = list_query_from_proto(request.into_inner());

        observed("FindAllProducts", async {
            let page = self.catalog.find_all(query).await?;
            Ok::<_, Status>(paged_products_to_proto(&page))
        })
        .await
    }

    async fn find_one_product(
        &self,
        request: Request<FindOneProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let query = get_query_from_proto(request.into_inner());

        observed("FindOneProduct", async {
            let product = self.catalog.find_one(query).await?;
            Ok::<_, Status>(product_to_proto(&product))
        })
        .await
    }

    async fn update_product(
        &self,
        request: Request<UpdateProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let cmd = update_command_from_proto(request.into_inner());

        observed("UpdateProduct", async {
            let product = self.catalog.update(cmd).await?;
            Ok::<_, Status>(product_to_proto(&product))
        })
        .await
    }

    async fn delete_product(
        &self,
        request: Request<DeleteProductRequest>,
    ) -> Result<Response<Product>, Status> {
        let cmd = delete_command_from_proto(request.into_inner());

        observed("DeleteProduct", async {
            let product = self.catalog.remove(cmd).await?;
            Ok::<_, Status>(product_to_proto(&product))
        })
        .await
    }
}
