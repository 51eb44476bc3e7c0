//! Rendered page handlers: index, block detail, search.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::explorer::SearchError;
use crate::http::render;
use crate::http::response::{not_found_page, page_failure, system_error};
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Response {
    match state.explorer.index().await {
        Ok(view) => Html(render::index_page(&view)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Index page failed");
            system_error(&e)
        }
    }
}

pub async fn block(State(state): State<AppState>, Path(hash): Path<String>) -> Response {
    match state.explorer.block(&hash).await {
        Ok(block) => Html(render::block_page(&block)).into_response(),
        Err(e) => page_failure(e, &hash),
    }
}

pub async fn search(State(state): State<AppState>, Path(query): Path<String>) -> Response {
    run_search(&state, &query).await
}

/// Form submissions arrive as `/search?q=...`.
pub async fn search_form(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    run_search(&state, params.q.as_deref().unwrap_or_default()).await
}

async fn run_search(state: &AppState, query: &str) -> Response {
    match state.explorer.search(query).await {
        Ok(hash) => Redirect::to(&format!("/block/{hash}")).into_response(),
        Err(e @ (SearchError::Empty | SearchError::TooLong { .. })) => {
            not_found_page(StatusCode::BAD_REQUEST, &e.to_string())
        }
        Err(e @ SearchError::NotFound(_)) => not_found_page(StatusCode::NOT_FOUND, &e.to_string()),
        Err(SearchError::Rpc(e)) => {
            tracing::error!(error = %e, "Search failed");
            system_error(&e)
        }
    }
}
