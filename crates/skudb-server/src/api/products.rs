//! SKU lookup handlers. These back the agent's `search_products` tool.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use skudb_core::{BatchLookupResult, LookupResult, RawValue};

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct SearchProductsRequest {
    /// Strings or JSON numbers; each is normalized independently.
    pub skus: Vec<RawValue>,
}

/// POST /api/v1/tools/search-products: batch SKU lookup in input order.
pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<SearchProductsRequest>,
) -> Result<Json<ApiResponse<BatchLookupResult>>, ApiError> {
    if body.skus.len() > state.lookup_max_skus {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            format!(
                "at most {} skus may be requested at once, got {}",
                state.lookup_max_skus,
                body.skus.len()
            ),
        ));
    }

    let data = skudb_catalog::find_many_by_sku(&state.pool, &body.skus, state.lookup_concurrency)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// GET /api/v1/products/{sku}: single lookup; a miss is still a 200.
pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(sku): Path<String>,
) -> Result<Json<ApiResponse<LookupResult>>, ApiError> {
    let data = skudb_catalog::find_by_sku(&state.pool, &RawValue::Text(sku))
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
