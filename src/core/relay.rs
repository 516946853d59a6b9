//! Identity relay endpoints
//!
//! Forwards `/identity/{*path}` to the upstream identity provider so the
//! browser client stays same-origin. The relay appends the provider API key
//! server-side and carries no authentication logic of its own; credential
//! verification happens entirely upstream.

use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{HeaderMap, Method, StatusCode, header},
    response::Response,
    routing::any,
};

use crate::core::config::Config;

/// Relay state: the shared HTTP client and upstream coordinates.
#[derive(Clone)]
pub struct RelayState {
    client: reqwest::Client,
    upstream_url: String,
    api_key: Option<String>,
}

impl RelayState {
    /// Build relay state from config. `None` when no upstream is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let upstream_url = config.identity_upstream_url.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            upstream_url: upstream_url.trim_end_matches('/').to_string(),
            api_key: config.identity_api_key.clone(),
        })
    }
}

/// Build the relay router.
pub fn identity_relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/identity/{*path}", any(relay_identity))
        .with_state(state)
}

/// Forwarded query string: the caller's query plus the configured API key,
/// unless the caller already passed one.
fn relay_query(query: Option<&str>, api_key: Option<&str>) -> Option<String> {
    let query = query.filter(|q| !q.is_empty());
    let caller_has_key =
        query.is_some_and(|q| q.split('&').any(|pair| pair.starts_with("key=")));

    match (query, api_key) {
        (Some(query), Some(key)) if !caller_has_key => Some(format!("{}&key={}", query, key)),
        (Some(query), _) => Some(query.to_string()),
        (None, Some(key)) => Some(format!("key={}", key)),
        (None, None) => None,
    }
}

async fn relay_identity(
    State(state): State<RelayState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, StatusCode> {
    let mut url = format!("{}/{}", state.upstream_url, path);
    if let Some(query) = relay_query(query.as_deref(), state.api_key.as_deref()) {
        url = format!("{}?{}", url, query);
    }

    let method = reqwest::Method::from_bytes(method.as_str().as_bytes())
        .map_err(|_| StatusCode::BAD_GATEWAY)?;

    let mut request = state.client.request(method, &url).body(body.to_vec());
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        if let Ok(value) = content_type.to_str() {
            request = request.header(reqwest::header::CONTENT_TYPE, value);
        }
    }

    let upstream = request.send().await.map_err(|error| {
        tracing::error!("identity relay request failed: {}", error);
        StatusCode::BAD_GATEWAY
    })?;

    let status =
        StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = upstream
        .bytes()
        .await
        .map_err(|_| StatusCode::BAD_GATEWAY)?;

    let mut response = Response::builder().status(status);
    if let Some(content_type) = content_type {
        response = response.header(header::CONTENT_TYPE, content_type);
    }
    response
        .body(Body::from(bytes.to_vec()))
        .map_err(|_| StatusCode::BAD_GATEWAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_query_appends_configured_key() {
        assert_eq!(
            relay_query(Some("a=1"), Some("secret")),
            Some("a=1&key=secret".to_string())
        );
        assert_eq!(relay_query(None, Some("secret")), Some("key=secret".to_string()));
    }

    #[test]
    fn relay_query_keeps_caller_key() {
        assert_eq!(
            relay_query(Some("key=caller"), Some("secret")),
            Some("key=caller".to_string())
        );
        assert_eq!(
            relay_query(Some("a=1&key=caller"), Some("secret")),
            Some("a=1&key=caller".to_string())
        );
    }

    #[test]
    fn relay_query_without_key() {
        assert_eq!(relay_query(Some("a=1"), None), Some("a=1".to_string()));
        assert_eq!(relay_query(None, None), None);
        assert_eq!(relay_query(Some(""), Some("secret")), Some("key=secret".to_string()));
    }

    #[test]
    fn relay_state_requires_an_upstream() {
        let config = Config {
            identity_upstream_url: None,
            identity_api_key: Some("secret".to_string()),
        };
        assert!(RelayState::from_config(&config).is_none());
    }

    #[test]
    fn relay_state_trims_trailing_slash() {
        let config = Config {
            identity_upstream_url: Some("https://identity.example.com/".to_string()),
            identity_api_key: None,
        };
        let state = RelayState::from_config(&config).unwrap();
        assert_eq!(state.upstream_url, "https://identity.example.com");
        assert!(state.api_key.is_none());
    }
}
