//! Reading-log routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::books::{Book, BookData, BookDraft, ReadingStatus};
use crate::server::app::AppState;
use crate::server::auth::AuthMember;

fn validate_draft(draft: &BookDraft) -> Result<(), ApiError> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }
    draft
        .status
        .parse::<ReadingStatus>()
        .map_err(|_| ApiError::validation("unknown reading status"))?;
    if let Some(rating) = draft.rating {
        if !(1..=5).contains(&rating) {
            return Err(ApiError::validation("rating must be between 1 and 5"));
        }
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
}

/// Everyone's shelves, newest first, optionally filtered by genre.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BookData>>, ApiError> {
    let books = match query.genre.as_deref().filter(|g| !g.is_empty()) {
        Some(genre) => Book::find_by_genre(genre, &state.db_pool).await?,
        None => Book::find_all_recent(&state.db_pool).await?,
    };
    Ok(Json(books.into_iter().map(BookData::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthMember,
    Json(draft): Json<BookDraft>,
) -> Result<(StatusCode, Json<BookData>), ApiError> {
    validate_draft(&draft)?;
    let book = Book::create(auth.member_id, &draft, &state.db_pool).await?;
    info!(member = %auth.username, title = %book.title, "book logged");
    Ok((StatusCode::CREATED, Json(book.into())))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
}

pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<BookData>>, ApiError> {
    let books = if query.keyword.trim().is_empty() {
        Book::find_all_recent(&state.db_pool).await?
    } else {
        Book::search(query.keyword.trim(), &state.db_pool).await?
    };
    Ok(Json(books.into_iter().map(BookData::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookData>, ApiError> {
    let book = Book::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("book not found"))?;
    Ok(Json(book.into()))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthMember,
    Path(id): Path<Uuid>,
    Json(draft): Json<BookDraft>,
) -> Result<Json<BookData>, ApiError> {
    validate_draft(&draft)?;

    let book = Book::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("book not found"))?;
    if book.member_id != auth.member_id {
        return Err(ApiError::forbidden("only the owner can edit this book"));
    }

    let updated = Book::update(id, &draft, &state.db_pool).await?;
    Ok(Json(updated.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    auth: AuthMember,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let book = Book::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("book not found"))?;
    if book.member_id != auth.member_id {
        return Err(ApiError::forbidden("only the owner can delete this book"));
    }

    Book::delete(id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
