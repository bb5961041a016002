use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use skudb_catalog::{import_csv, ImportRequest};
use tower::ServiceExt;

const SEED_CSV: &str = "sku,product_name,color_variant,size_variant,unit_price,page\n\
                        19976,Brasier strapless,Habano,40,77990,205\n\
                        9241,Panty clasico,Habano,L,39990,207\n";

fn test_state(pool: SqlitePool) -> AppState {
    AppState {
        pool,
        lookup_concurrency: 4,
        lookup_max_skus: 3,
    }
}

async fn seed(pool: &SqlitePool) -> i64 {
    import_csv(pool, SEED_CSV.as_bytes(), &ImportRequest::new("leonisa", "172025"))
        .await
        .expect("seed import failed")
        .catalog_id
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}

fn search_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/v1/tools/search-products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[test]
fn api_error_validation_error_maps_to_bad_request() {
    let response = ApiError::new("req-1", "validation_error", "invalid input").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn api_error_not_found_maps_to_404() {
    let response = ApiError::new("req-1", "not_found", "missing").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn pool_timeout_maps_to_unavailable() {
    let err = map_db_error(
        "req-1".to_string(),
        &skudb_db::DbError::Sqlx(sqlx::Error::PoolTimedOut),
    );
    assert_eq!(err.error.code, "unavailable");
    assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[sqlx::test(migrations = "../../migrations")]
async fn health_reports_ok_and_echoes_request_id(pool: SqlitePool) {
    let app = build_app(test_state(pool), AuthState::disabled());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "req-health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-health")
    );
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["meta"]["request_id"], "req-health");
}

#[sqlx::test(migrations = "../../migrations")]
async fn search_products_returns_found_and_not_found(pool: SqlitePool) {
    seed(&pool).await;
    let app = build_app(test_state(pool), AuthState::disabled());

    let response = app
        .oneshot(search_request(&serde_json::json!({ "skus": ["22236", 19976] })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["total"], 2);
    assert_eq!(data["found_count"], 1);
    assert_eq!(data["not_found_count"], 1);
    assert_eq!(data["not_found_skus"], serde_json::json!(["22236"]));
    assert_eq!(data["results"][0]["found"], false);
    assert_eq!(data["results"][1]["found"], true);
    assert_eq!(data["results"][1]["normalized_sku"], "019976");
    assert_eq!(data["results"][1]["product"]["product_name"], "Brasier strapless");
}

#[sqlx::test(migrations = "../../migrations")]
async fn search_products_rejects_oversized_batch(pool: SqlitePool) {
    let app = build_app(test_state(pool), AuthState::disabled());

    let response = app
        .oneshot(search_request(
            &serde_json::json!({ "skus": ["1", "2", "3", "4"] }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "validation_error");
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_product_miss_is_still_ok(pool: SqlitePool) {
    seed(&pool).await;
    let app = build_app(test_state(pool), AuthState::disabled());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/products/abc")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["found"], false);
    assert!(json["data"]["product"].is_null());
}

#[sqlx::test(migrations = "../../migrations")]
async fn get_product_pads_short_sku(pool: SqlitePool) {
    seed(&pool).await;
    let app = build_app(test_state(pool), AuthState::disabled());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/products/9241")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["found"], true);
    assert_eq!(json["data"]["product"]["sku"], "009241");
}

#[sqlx::test(migrations = "../../migrations")]
async fn catalogs_list_and_products(pool: SqlitePool) {
    let catalog_id = seed(&pool).await;
    let app = build_app(test_state(pool), AuthState::disabled());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/catalogs")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["catalog_name"], "leonisa");
    assert_eq!(data[0]["product_count"], 2);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/catalogs/{catalog_id}/products"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let skus: Vec<&str> = json["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|p| p["sku"].as_str())
        .collect();
    assert_eq!(skus, vec!["009241", "019976"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_catalog_is_404(pool: SqlitePool) {
    let app = build_app(test_state(pool), AuthState::disabled());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/catalogs/999/products")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn protected_routes_require_bearer_token_when_enabled(pool: SqlitePool) {
    let auth = AuthState::from_keys("secret", &skudb_core::Environment::Production).expect("auth");
    let app = build_app(test_state(pool), auth);

    let denied = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/catalogs")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let allowed = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/catalogs")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(allowed.status(), StatusCode::OK);

    let health = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(health.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../migrations")]
async fn rejected_key_uses_error_envelope_with_request_id(pool: SqlitePool) {
    let auth = AuthState::from_keys("secret", &skudb_core::Environment::Production).expect("auth");
    let app = build_app(test_state(pool), auth);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/catalogs")
                .header(header::AUTHORIZATION, "Bearer wrong")
                .header("x-request-id", "req-auth-1")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-auth-1")
    );
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "unauthorized");
    assert_eq!(json["meta"]["request_id"], "req-auth-1");
}
