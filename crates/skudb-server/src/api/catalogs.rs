use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skudb_core::Product;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct CatalogItem {
    id: i64,
    catalog_name: String,
    campaign_code: String,
    description: Option<String>,
    product_count: i64,
    created_at: DateTime<Utc>,
}

/// GET /api/v1/catalogs
pub(super) async fn list_catalogs(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<CatalogItem>>>, ApiError> {
    let rows = skudb_db::list_catalogs(&state.pool)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    let data = rows
        .into_iter()
        .map(|row| CatalogItem {
            id: row.id,
            catalog_name: row.catalog_name,
            campaign_code: row.campaign_code,
            description: row.description,
            product_count: row.product_count,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/catalogs/{catalog_id}/products
pub(super) async fn list_catalog_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(catalog_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<Product>>>, ApiError> {
    let catalog = skudb_db::get_catalog(&state.pool, catalog_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;
    if catalog.is_none() {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("catalog {catalog_id} not found"),
        ));
    }

    let rows = skudb_db::list_products_by_catalog(&state.pool, catalog_id)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: rows.into_iter().map(Product::from).collect(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
