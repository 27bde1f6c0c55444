//! External catalog routes.
//!
//! These endpoints always answer 200 with a (possibly empty) list: a
//! provider outage empties a widget, it does not fail the request.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::common::ApiError;
use crate::domains::catalog::{BookRecord, ChartBookView, RecommendedBookView};
use crate::server::app::AppState;

/// Upper bound on feed sizes a caller can ask for.
const MAX_FEED_COUNT: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

impl CountQuery {
    fn resolve(&self, default: usize) -> usize {
        self.count.unwrap_or(default).clamp(1, MAX_FEED_COUNT)
    }
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<BookRecord>> {
    Json(state.catalog.search(query.query.trim()).await)
}

pub async fn library_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<BookRecord>> {
    Json(state.catalog.search_library(query.query.trim()).await)
}

pub async fn lookup_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
) -> Result<Json<BookRecord>, ApiError> {
    state
        .catalog
        .lookup_isbn(isbn.trim())
        .await
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no catalog entry for this ISBN"))
}

pub async fn recommended(
    State(state): State<AppState>,
    Query(count): Query<CountQuery>,
) -> Json<Vec<RecommendedBookView>> {
    Json(state.catalog.latest_recommended(count.resolve(5)).await)
}

pub async fn monthly_recommended(
    State(state): State<AppState>,
    Query(count): Query<CountQuery>,
) -> Json<Vec<RecommendedBookView>> {
    Json(state.catalog.monthly_recommended(count.resolve(5)).await)
}

pub async fn recommended_by_category(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(count): Query<CountQuery>,
) -> Json<Vec<RecommendedBookView>> {
    Json(
        state
            .catalog
            .recommended_by_category(code.trim(), count.resolve(5))
            .await,
    )
}

pub async fn bestsellers(
    State(state): State<AppState>,
    Query(count): Query<CountQuery>,
) -> Json<Vec<ChartBookView>> {
    Json(state.catalog.daily_bestsellers(count.resolve(10)).await)
}

pub async fn new_titles(
    State(state): State<AppState>,
    Query(count): Query<CountQuery>,
) -> Json<Vec<ChartBookView>> {
    Json(state.catalog.daily_new_titles(count.resolve(10)).await)
}
