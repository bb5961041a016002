//! Request correlation and API-key checks for the tool endpoints.

use std::{collections::HashSet, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use skudb_core::Environment;
use uuid::Uuid;

use crate::api::ApiError;

const API_KEYS_VAR: &str = "SKUDB_API_KEYS";
const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one request, available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// The set of API keys the agent may present. `None` means every request
/// is let through.
#[derive(Debug, Clone)]
pub struct AuthState {
    keys: Option<Arc<HashSet<String>>>,
}

impl AuthState {
    /// Reads keys from `SKUDB_API_KEYS`; see [`AuthState::from_keys`].
    pub fn from_env(env: &Environment) -> anyhow::Result<Self> {
        let raw = std::env::var(API_KEYS_VAR).unwrap_or_default();
        Self::from_keys(&raw, env)
    }

    /// Parses a comma-separated key list.
    ///
    /// An empty list turns the check off in development and is a startup
    /// error in `test` and `production`.
    pub fn from_keys(raw: &str, env: &Environment) -> anyhow::Result<Self> {
        let keys: HashSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();

        if !keys.is_empty() {
            tracing::info!(count = keys.len(), "api key check enabled");
            return Ok(Self {
                keys: Some(Arc::new(keys)),
            });
        }

        match env {
            Environment::Development => {
                tracing::warn!("no {API_KEYS_VAR} configured; tool endpoints are open");
                Ok(Self::disabled())
            }
            other => anyhow::bail!("{API_KEYS_VAR} must list at least one key when SKUDB_ENV={other}"),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self { keys: None }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.keys.is_some()
    }

    fn accepts(&self, headers: &HeaderMap) -> bool {
        let Some(keys) = &self.keys else {
            return true;
        };
        bearer_token(headers.get(AUTHORIZATION)).is_some_and(|token| keys.contains(token))
    }
}

/// Tags each request with a [`RequestId`] and echoes it in the response.
///
/// A caller-supplied `x-request-id` is reused when it is non-blank and at most
/// 128 bytes; anything else gets a fresh UUID.
pub async fn request_id(mut req: Request, next: Next) -> Response {
    let id = incoming_request_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let mut res = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}

/// Rejects requests without an accepted key using the standard error envelope.
pub async fn require_bearer_auth(
    State(auth): State<AuthState>,
    req: Request,
    next: Next,
) -> Response {
    if auth.accepts(req.headers()) {
        return next.run(req).await;
    }

    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default();
    tracing::debug!(path = %req.uri().path(), %request_id, "api key rejected");
    ApiError::new(request_id, "unauthorized", "a valid API key is required").into_response()
}

fn incoming_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
}

fn bearer_token(value: Option<&HeaderValue>) -> Option<&str> {
    let token = value?.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(name: &'static str, value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_token_is_extracted_and_trimmed() {
        let header = HeaderValue::from_static("Bearer  key-1 ");
        assert_eq!(bearer_token(Some(&header)), Some("key-1"));
    }

    #[test]
    fn non_bearer_or_blank_tokens_are_ignored() {
        assert_eq!(bearer_token(Some(&HeaderValue::from_static("Basic abc123"))), None);
        assert_eq!(bearer_token(Some(&HeaderValue::from_static("Bearer   "))), None);
        assert_eq!(bearer_token(None), None);
    }

    #[test]
    fn empty_key_list_opens_endpoints_in_development() {
        let auth = AuthState::from_keys("", &Environment::Development).expect("dev allows no keys");
        assert!(!auth.is_enabled());
        assert!(auth.accepts(&HeaderMap::new()));
    }

    #[test]
    fn empty_key_list_fails_outside_development() {
        let err = AuthState::from_keys(" , ", &Environment::Production).unwrap_err();
        assert!(err.to_string().contains("SKUDB_ENV=production"));
        assert!(AuthState::from_keys("", &Environment::Test).is_err());
    }

    #[test]
    fn listed_keys_are_accepted() {
        let auth = AuthState::from_keys(" alpha ,beta,,", &Environment::Production).expect("keys");
        assert!(auth.is_enabled());
        assert!(auth.accepts(&headers_with("authorization", "Bearer alpha")));
        assert!(auth.accepts(&headers_with("authorization", "Bearer beta")));
        assert!(!auth.accepts(&headers_with("authorization", "Bearer gamma")));
        assert!(!auth.accepts(&HeaderMap::new()));
    }

    #[test]
    fn incoming_request_id_is_reused_when_reasonable() {
        assert_eq!(
            incoming_request_id(&headers_with("x-request-id", " req-7 ")).as_deref(),
            Some("req-7")
        );
        assert_eq!(incoming_request_id(&headers_with("x-request-id", "  ")), None);
        assert_eq!(incoming_request_id(&HeaderMap::new()), None);
    }
}
