//! Domain to Proto conversions

use catalog_common::{PageMeta, PagedResult};
use chrono::{DateTime, Utc};

use crate::domain::Product;
use crate::proto;

pub fn timestamp_to_proto(dt: &DateTime<Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: dt.timestamp(),
        nanos: i32::try_from(dt.timestamp_subsec_nanos()).unwrap_or(0),
    }
}

pub fn product_to_proto(product: &Product) -> proto::Product {
    proto::Product {
        id: product.id.0,
        name: product.name.clone(),
        price: product.price,
        available: product.is_available(),
        created_at: Some(timestamp_to_proto(&product.created_at)),
        updated_at: Some(timestamp_to_proto(&product.updated_at)),
    }
}

pub fn page_meta_to_proto(meta: &PageMeta) -> proto::PageMeta {
    proto::PageMeta {
        total: meta.total,
        page: meta.page,
        last_page: meta.last_page,
    }
}

pub fn paged_products_to_proto(result: &PagedResult<Product>) -> proto::FindAllProductsResponse {
    proto::FindAllProductsResponse {
        data: result.data.iter().map(product_to_proto).collect(),
        meta: Some(page_meta_to_proto(&result.meta)),
    }
}
