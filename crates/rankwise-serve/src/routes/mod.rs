//! API route definitions.

mod catalog;
mod estimate;
mod health;
mod score;

use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::header;
use axum::middleware;
use axum::response::Response;
use axum::routing::{get, post};

use crate::state::AppState;

/// Build the complete API router.
///
/// # Route Structure
///
/// - `GET /health` - Health check
///
/// ## Catalogs (cacheable)
/// - `GET /api/v1/years` - Available years, most recent first
/// - `GET /api/v1/combinations` - Available combinations, ascending
/// - `GET /api/v1/form` - Initial entry form state
///
/// ## Estimation
/// - `POST /api/v1/score/normalize` - Normalize one score field keystroke
/// - `POST /api/v1/estimate` - Estimate rankings for a batch of entries
pub fn router(state: AppState) -> Router {
    let public = Router::new().route("/health", get(health::health_check));

    let catalogs = Router::new()
        .route("/years", get(catalog::years))
        .route("/combinations", get(catalog::combinations))
        .route("/form", get(catalog::form))
        .layer(middleware::map_response_with_state(
            state.clone(),
            add_cache_headers,
        ));

    let api_v1 = Router::new()
        .merge(catalogs)
        .route("/score/normalize", post(score::normalize))
        .route("/estimate", post(estimate::estimate));

    Router::new()
        .merge(public)
        .nest("/api/v1", api_v1)
        .with_state(state)
}

/// Browsers may serve a stale catalog for this long while revalidating.
const STALE_WHILE_REVALIDATE: Duration = Duration::from_secs(300);

/// Cache-Control value for catalog responses.
///
/// `max-age` follows the server-side catalog TTL so clients never hold a
/// catalog longer than the server would.
fn catalog_cache_control(ttl: Duration) -> String {
    format!(
        "public, max-age={}, stale-while-revalidate={}",
        ttl.as_secs(),
        STALE_WHILE_REVALIDATE.as_secs()
    )
}

/// Add cache headers to successful catalog responses.
async fn add_cache_headers(State(state): State<AppState>, response: Response) -> Response {
    if !response.status().is_success() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let value = catalog_cache_control(state.config.catalog_ttl);
    if let Ok(val) = header::HeaderValue::from_str(&value) {
        parts.headers.insert(header::CACHE_CONTROL, val);
    }
    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::StatusCode;

    use super::*;
    use crate::state::Config;

    fn state_with_ttl(secs: u64) -> AppState {
        AppState::new(Config {
            bind_addr: "127.0.0.1:0".to_string(),
            clickhouse_url: "http://localhost:8123".to_string(),
            clickhouse_database: "admissions".to_string(),
            catalog_ttl: Duration::from_secs(secs),
        })
    }

    #[test]
    fn test_catalog_cache_control_follows_ttl() {
        assert_eq!(
            catalog_cache_control(Duration::from_secs(3600)),
            "public, max-age=3600, stale-while-revalidate=300"
        );
        assert_eq!(
            catalog_cache_control(Duration::from_secs(90)),
            "public, max-age=90, stale-while-revalidate=300"
        );
    }

    #[tokio::test]
    async fn test_cache_headers_use_configured_ttl() {
        let response =
            add_cache_headers(State(state_with_ttl(120)), Response::new(Body::empty())).await;
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=120, stale-while-revalidate=300"
        );
    }

    #[tokio::test]
    async fn test_cache_headers_skip_errors() {
        let mut error = Response::new(Body::empty());
        *error.status_mut() = StatusCode::NOT_FOUND;

        let response = add_cache_headers(State(state_with_ttl(120)), error).await;
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
    }
}
