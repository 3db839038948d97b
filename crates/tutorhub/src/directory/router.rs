use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::criteria::FilterCriteria;
use super::paginate::{PageRequest, DEFAULT_PAGE_SIZE};
use super::sort::SortSpec;
use super::source::ListingSource;

/// Search request body: criteria snapshot, ordering, and page selection.
/// Everything is optional so `{}` returns the first page of the full
/// directory under the default ordering.
#[derive(Debug, Default, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(default)]
    pub sort: SortSpec,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub page_size: Option<usize>,
}

pub(crate) struct DirectoryRouterState<S> {
    source: Arc<S>,
    page_size: usize,
}

/// Router builder exposing the discovery endpoints over a listing source.
pub fn directory_router<S>(source: Arc<S>, page_size: usize) -> Router
where
    S: ListingSource + 'static,
{
    let state = Arc::new(DirectoryRouterState {
        source,
        page_size: if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        },
    });

    Router::new()
        .route("/api/v1/directory/search", post(search_handler::<S>))
        .route(
            "/api/v1/directory/listings/:listing_id",
            get(listing_handler::<S>),
        )
        .with_state(state)
}

pub(crate) async fn search_handler<S>(
    State(state): State<Arc<DirectoryRouterState<S>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: ListingSource + 'static,
{
    let listings = match state.source.all() {
        Ok(listings) => listings,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response();
        }
    };

    let page_request = PageRequest::new(
        request.page.unwrap_or(1),
        request.page_size.unwrap_or(state.page_size),
    );
    let page = super::search(
        &listings,
        &request.criteria,
        &request.sort,
        page_request,
        Utc::now(),
    );

    (StatusCode::OK, axum::Json(page)).into_response()
}

pub(crate) async fn listing_handler<S>(
    State(state): State<Arc<DirectoryRouterState<S>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: ListingSource + 'static,
{
    match state.source.by_id(&listing_id) {
        Ok(Some(listing)) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Ok(None) => {
            let payload = json!({ "error": format!("listing '{listing_id}' not found") });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
