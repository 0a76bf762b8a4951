//! catalog-products Service - Product Catalog

use std::sync::Arc;

use catalog_bootstrap::{Infrastructure, build_reflection, run_server};
use tracing::info;

use catalog_products::FILE_DESCRIPTOR_SET;
use catalog_products::api::ProductServiceImpl;
use catalog_products::application::ProductCatalog;
use catalog_products::infrastructure::persistence::PostgresProductRepository;
use catalog_products::proto::product_service_server::ProductServiceServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_server("config", |infra: Infrastructure, mut server| async move {
        info!("Initializing catalog-products service...");

        let repo = Arc::new(PostgresProductRepository::new(infra.postgres_pool()));
        info!("Repository initialized");

        let catalog = Arc::new(ProductCatalog::new(repo));
        let service = ProductServiceImpl::new(catalog);

        let reflection_service = build_reflection(&[FILE_DESCRIPTOR_SET])?;

        Ok(server
            .add_service(ProductServiceServer::new(service))
            .add_service(reflection_service))
    })
    .await
}
