//! 商品目录端到端流程测试（内存仓储）

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use catalog_common::{Pagination, PaginationRequest};
use catalog_errors::{AppError, AppResult, ProblemDetails};
use catalog_products::api::ProductServiceImpl;
use catalog_products::application::*;
use catalog_products::domain::{
    NewProduct, Product, ProductChanges, ProductId, ProductRepository, ProductStatus,
};
use catalog_products::error::ProductError;
use catalog_products::proto;
use catalog_products::proto::product_service_server::ProductService;
use chrono::Utc;
use tonic::{Code, Request};

/// 内存仓储，行为与 PostgreSQL 实现一致：软删除只改状态
#[derive(Default)]
struct InMemoryProductRepository {
    rows: Mutex<Vec<Product>>,
    fail: Option<AppError>,
}

impl InMemoryProductRepository {
    fn failing(err: AppError) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            fail: Some(err),
        }
    }

    fn check(&self) -> AppResult<()> {
        match &self.fail {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn row_status(&self, id: ProductId) -> Option<ProductStatus> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.status)
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: &NewProduct) -> AppResult<Product> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let created = Product {
            id: ProductId::new(rows.len() as i32 + 1),
            name: product.name.clone(),
            price: product.price,
            status: ProductStatus::Active,
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn count_active(&self) -> AppResult<u64> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|p| p.status.is_active()).count() as u64)
    }

    async fn list_active(&self, pagination: &Pagination) -> AppResult<Vec<Product>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|p| p.status.is_active())
            .skip(pagination.offset() as usize)
            .take(pagination.limit() as usize)
            .cloned()
            .collect())
    }

    async fn find_active_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.check()?;
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|p| p.id == id && p.status.is_active())
            .cloned())
    }

    async fn update_active(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> AppResult<Option<Product>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|p| p.id == id && p.status.is_active())
            .map(|p| {
                changes.apply_to(p);
                p.updated_at = Utc::now();
                p.clone()
            }))
    }

    async fn deactivate(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.check()?;
        let mut rows = self.rows.lock().unwrap();
        Ok(rows
            .iter_mut()
            .find(|p| p.id == id && p.status.is_active())
            .map(|p| {
                p.status = ProductStatus::Deleted;
                p.updated_at = Utc::now();
                p.clone()
            }))
    }
}

fn setup() -> (Arc<InMemoryProductRepository>, ProductCatalog) {
    let repo = Arc::new(InMemoryProductRepository::default());
    let catalog = ProductCatalog::new(repo.clone());
    (repo, catalog)
}

fn create(name: &str, price: f64) -> CreateProductCommand {
    CreateProductCommand {
        name: name.to_string(),
        price,
    }
}

fn list(page: Option<i64>, limit: Option<i64>) -> ListProductsQuery {
    ListProductsQuery::new(PaginationRequest::new(page, limit))
}

async fn seed(catalog: &ProductCatalog, count: usize) {
    for i in 1..=count {
        catalog
            .create(create(&format!("Product {}", i), i as f64))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_create_assigns_id_and_is_available() {
    let (_, catalog) = setup();

    let product = catalog.create(create("Widget", 9.99)).await.unwrap();
    assert_eq!(product.id, ProductId(1));
    assert_eq!(product.name, "Widget");
    assert_eq!(product.price, 9.99);
    assert!(product.is_available());

    let found = catalog
        .find_one(GetProductQuery { id: product.id })
        .await
        .unwrap();
    assert_eq!(found, product);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let (repo, catalog) = setup();

    let err = catalog.create(create("", 1.0)).await.unwrap_err();
    assert!(matches!(err, ProductError::App(AppError::Validation(_))));

    let err = catalog.create(create("Widget", -1.0)).await.unwrap_err();
    assert!(matches!(err, ProductError::App(AppError::Validation(_))));

    assert_eq!(repo.count_active().await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_all_on_empty_catalog() {
    let (_, catalog) = setup();

    let page = catalog.find_all(list(None, None)).await.unwrap();
    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.last_page, 0);
}

#[tokio::test]
async fn test_find_all_paginates_in_id_order() {
    let (_, catalog) = setup();
    seed(&catalog, 25).await;

    let first = catalog.find_all(list(None, None)).await.unwrap();
    assert_eq!(first.data.len(), 10);
    assert_eq!(first.meta.total, 25);
    assert_eq!(first.meta.last_page, 3);
    assert_eq!(first.data[0].id, ProductId(1));

    let last = catalog.find_all(list(Some(3), Some(10))).await.unwrap();
    assert_eq!(last.data.len(), 5);
    assert_eq!(last.meta.page, 3);
    assert_eq!(last.data[0].id, ProductId(21));

    let beyond = catalog.find_all(list(Some(9), Some(10))).await.unwrap();
    assert!(beyond.data.is_empty());
    assert_eq!(beyond.meta.page, 9);
    assert_eq!(beyond.meta.total, 25);
}

#[tokio::test]
async fn test_find_all_clamps_non_positive_values() {
    let (_, catalog) = setup();
    seed(&catalog, 3).await;

    let page = catalog.find_all(list(Some(0), Some(0))).await.unwrap();
    assert_eq!(page.meta.page, 1);
    assert_eq!(page.meta.last_page, 3);
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, ProductId(1));
}

#[tokio::test]
async fn test_pages_cover_every_available_product_once() {
    let (_, catalog) = setup();
    seed(&catalog, 17).await;
    catalog
        .remove(DeleteProductCommand { id: ProductId(4) })
        .await
        .unwrap();

    let first = catalog.find_all(list(Some(1), Some(5))).await.unwrap();
    let mut seen: Vec<ProductId> = Vec::new();
    for page in 1..=first.meta.last_page {
        let result = catalog
            .find_all(list(Some(page as i64), Some(5)))
            .await
            .unwrap();
        seen.extend(result.data.iter().map(|p| p.id));
    }

    assert_eq!(first.meta.total, 16);
    assert_eq!(seen.len(), 16);
    assert!(!seen.contains(&ProductId(4)));
    assert!(seen.windows(2).all(|w| w[0].value() < w[1].value()));
}

#[tokio::test]
async fn test_find_one_missing_is_not_found() {
    let (_, catalog) = setup();

    let err = catalog
        .find_one(GetProductQuery { id: ProductId(42) })
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::NotFound(ProductId(42)));
    assert_eq!(err.to_string(), "Product with id 42 not found");
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let (_, catalog) = setup();
    let product = catalog.create(create("Widget", 10.0)).await.unwrap();

    let updated = catalog
        .update(UpdateProductCommand {
            id: product.id,
            payload_id: None,
            name: None,
            price: Some(12.5),
        })
        .await
        .unwrap();

    assert_eq!(updated.id, product.id);
    assert_eq!(updated.name, "Widget");
    assert_eq!(updated.price, 12.5);
    assert!(updated.is_available());
}

#[tokio::test]
async fn test_update_ignores_id_in_payload() {
    let (_, catalog) = setup();
    seed(&catalog, 2).await;

    let updated = catalog
        .update(UpdateProductCommand {
            id: ProductId(1),
            payload_id: Some(ProductId(2)),
            name: Some("Renamed".to_string()),
            price: None,
        })
        .await
        .unwrap();
    assert_eq!(updated.id, ProductId(1));
    assert_eq!(updated.name, "Renamed");

    let other = catalog
        .find_one(GetProductQuery { id: ProductId(2) })
        .await
        .unwrap();
    assert_eq!(other.name, "Product 2");
}

#[tokio::test]
async fn test_empty_update_returns_current_state() {
    let (_, catalog) = setup();
    let product = catalog.create(create("Widget", 10.0)).await.unwrap();

    let unchanged = catalog
        .update(UpdateProductCommand {
            id: product.id,
            payload_id: None,
            name: None,
            price: None,
        })
        .await
        .unwrap();
    assert_eq!(unchanged, product);

    let err = catalog
        .update(UpdateProductCommand {
            id: ProductId(99),
            payload_id: None,
            name: None,
            price: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::NotFound(ProductId(99)));
}

#[tokio::test]
async fn test_update_rejects_invalid_values() {
    let (_, catalog) = setup();
    let product = catalog.create(create("Widget", 10.0)).await.unwrap();

    let err = catalog
        .update(UpdateProductCommand {
            id: product.id,
            payload_id: None,
            name: Some("   ".to_string()),
            price: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::App(AppError::Validation(_))));
}

#[tokio::test]
async fn test_remove_is_soft_delete() {
    let (repo, catalog) = setup();
    seed(&catalog, 3).await;

    let removed = catalog
        .remove(DeleteProductCommand { id: ProductId(2) })
        .await
        .unwrap();
    assert_eq!(removed.id, ProductId(2));
    assert_eq!(removed.status, ProductStatus::Deleted);
    assert!(!removed.is_available());

    // 行仍然存在，只是不可见
    assert_eq!(repo.row_status(ProductId(2)), Some(ProductStatus::Deleted));

    let err = catalog
        .find_one(GetProductQuery { id: ProductId(2) })
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::NotFound(ProductId(2)));

    let page = catalog.find_all(list(None, None)).await.unwrap();
    assert_eq!(page.meta.total, 2);
    assert!(page.data.iter().all(|p| p.id != ProductId(2)));

    let err = catalog
        .update(UpdateProductCommand {
            id: ProductId(2),
            payload_id: None,
            name: Some("Back".to_string()),
            price: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::NotFound(ProductId(2)));
}

#[tokio::test]
async fn test_remove_twice_is_not_found() {
    let (_, catalog) = setup();
    seed(&catalog, 1).await;

    catalog
        .remove(DeleteProductCommand { id: ProductId(1) })
        .await
        .unwrap();
    let err = catalog
        .remove(DeleteProductCommand { id: ProductId(1) })
        .await
        .unwrap_err();
    assert_eq!(err, ProductError::NotFound(ProductId(1)));
}

#[tokio::test]
async fn test_store_errors_pass_through() {
    let repo = Arc::new(InMemoryProductRepository::failing(AppError::database(
        "connection refused",
    )));
    let catalog = ProductCatalog::new(repo);

    let err = catalog.find_all(list(None, None)).await.unwrap_err();
    assert_eq!(
        err,
        ProductError::App(AppError::database("connection refused"))
    );
}

// ========== gRPC 层 ==========

fn grpc_service() -> ProductServiceImpl {
    let (_, catalog) = setup();
    ProductServiceImpl::new(Arc::new(catalog))
}

#[tokio::test]
async fn test_grpc_create_and_find_one() {
    let service = grpc_service();

    let created = service
        .create_product(Request::new(proto::CreateProductRequest {
            name: "Widget".to_string(),
            price: 3.5,
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(created.id, 1);
    assert!(created.available);
    assert!(created.created_at.is_some());

    let found = service
        .find_one_product(Request::new(proto::FindOneProductRequest { id: created.id }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(found, created);
}

#[tokio::test]
async fn test_grpc_find_all_meta() {
    let service = grpc_service();
    for i in 0..3 {
        service
            .create_product(Request::new(proto::CreateProductRequest {
                name: format!("P{}", i),
                price: 1.0,
            }))
            .await
            .unwrap();
    }

    let response = service
        .find_all_products(Request::new(proto::FindAllProductsRequest {
            page: Some(2),
            limit: Some(2),
        }))
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.data.len(), 1);
    let meta = response.meta.unwrap();
    assert_eq!(meta.total, 3);
    assert_eq!(meta.page, 2);
    assert_eq!(meta.last_page, 2);
}

#[tokio::test]
async fn test_grpc_not_found_carries_problem_details() {
    let service = grpc_service();

    let status = service
        .find_one_product(Request::new(proto::FindOneProductRequest { id: 7 }))
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "Product with id 7 not found");

    let problem = ProblemDetails::from_status(&status).unwrap();
    assert_eq!(problem.status, 400);
    assert_eq!(problem.detail, "Product with id 7 not found");
}

#[tokio::test]
async fn test_grpc_update_and_delete() {
    let service = grpc_service();
    service
        .create_product(Request::new(proto::CreateProductRequest {
            name: "Widget".to_string(),
            price: 1.0,
        }))
        .await
        .unwrap();

    let updated = service
        .update_product(Request::new(proto::UpdateProductRequest {
            id: 1,
            data: Some(proto::ProductPatch {
                id: Some(100),
                name: None,
                price: Some(2.0),
            }),
        }))
        .await
        .unwrap()
        .into_inner();
    assert_eq!(updated.id, 1);
    assert_eq!(updated.price, 2.0);

    let deleted = service
        .delete_product(Request::new(proto::DeleteProductRequest { id: 1 }))
        .await
        .unwrap()
        .into_inner();
    assert!(!deleted.available);

    let status = service
        .delete_product(Request::new(proto::DeleteProductRequest { id: 1 }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_grpc_validation_error_is_invalid_argument() {
    let service = grpc_service();

    let status = service
        .create_product(Request::new(proto::CreateProductRequest {
            name: String::new(),
            price: 1.0,
        }))
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
}
