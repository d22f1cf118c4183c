//! HTTP surface for the ECSS Standards Navigator.
//!
//! A compact Axum router with three read-only endpoints:
//!
//! - `GET /api/search?q=<query>` – Ask Morphik and return at most one synthesized result.
//!   Optional `branch`, `discipline` and `revision` parameters filter by document metadata.
//! - `GET /api/documents` – List ingested documents with their processing status.
//! - `GET /api/health` – Report whether a Morphik client can be constructed.
//!
//! Every handler answers `200 OK` with a JSON body; failures are reported in an `error` field.

use crate::search::{DocumentSummary, SearchFilters, SearchResult};
use crate::service::{HealthReport, NavigatorApi};
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, Method},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the HTTP router exposing the navigator API.
pub fn create_router<S>(service: Arc<S>, allowed_origins: &[String]) -> Router
where
    S: NavigatorApi + 'static,
{
    Router::new()
        .route("/api/search", get(search::<S>))
        .route("/api/documents", get(list_documents::<S>))
        .route("/api/health", get(health::<S>))
        .layer(cors_layer(allowed_origins))
        .with_state(service)
}

/// Browser access policy: `GET` only, from the configured origins (`*` allows any).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET]);
    if allowed_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(origin = %origin, error = %err, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Query string for `GET /api/search`.
///
/// Repeated parameters are allowed; the first occurrence of each one wins.
#[derive(Debug, Default)]
struct SearchParams {
    q: String,
    branch: Option<String>,
    discipline: Option<String>,
    revision: Option<String>,
}

impl SearchParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut q = None;
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut q,
                "branch" => &mut params.branch,
                "discipline" => &mut params.discipline,
                "revision" => &mut params.revision,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params.q = q.unwrap_or_default();
        params
    }
}

/// Response body for `GET /api/search`.
#[derive(Debug, Serialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
    total: usize,
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Search ECSS documents.
///
/// Blank queries short-circuit to an empty result set without contacting Morphik.
async fn search<S>(
    State(service): State<Arc<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<SearchResponse>
where
    S: NavigatorApi,
{
    let params = match query {
        Ok(Query(pairs)) => SearchParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Rejected search query string");
            return Json(SearchResponse {
                results: Vec::new(),
                total: 0,
                query: String::new(),
                error: Some(rejection.body_text()),
            });
        }
    };
    let SearchParams {
        q,
        branch,
        discipline,
        revision,
    } = params;

    if q.trim().is_empty() {
        return Json(SearchResponse {
            results: Vec::new(),
            total: 0,
            query: q,
            error: None,
        });
    }

    let filters = SearchFilters {
        branch,
        discipline,
        revision,
    };
    match service.search(&q, &filters).await {
        Ok(results) => {
            tracing::info!(query = %q, results = results.len(), "Search completed");
            Json(SearchResponse {
                total: results.len(),
                results,
                query: q,
                error: None,
            })
        }
        Err(err) => {
            tracing::error!(query = %q, error = %err, "Search failed");
            Json(SearchResponse {
                results: Vec::new(),
                total: 0,
                query: q,
                error: Some(err.to_string()),
            })
        }
    }
}

/// Response body for `GET /api/documents`.
#[derive(Debug, Serialize)]
struct DocumentsResponse {
    documents: Vec<DocumentSummary>,
    total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn list_documents<S>(State(service): State<Arc<S>>) -> Json<DocumentsResponse>
where
    S: NavigatorApi,
{
    match service.list_documents().await {
        Ok(documents) => Json(DocumentsResponse {
            total: documents.len(),
            documents,
            error: None,
        }),
        Err(err) => {
            tracing::error!(error = %err, "Listing documents failed");
            Json(DocumentsResponse {
                documents: Vec::new(),
                total: 0,
                error: Some(err.to_string()),
            })
        }
    }
}

async fn health<S>(State(service): State<Arc<S>>) -> Json<HealthReport>
where
    S: NavigatorApi,
{
    Json(service.health())
}
