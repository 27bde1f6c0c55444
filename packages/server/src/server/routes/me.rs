//! My-page routes: profile, account, and the member's own shelf.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::ApiError;
use crate::domains::books::{average_rating, Book, BookData, ReadingStatus};
use crate::domains::members::{Member, MemberData};
use crate::server::app::AppState;
use crate::server::auth::AuthMember;

pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthMember,
) -> Result<Json<MemberData>, ApiError> {
    let member = Member::find_by_id(auth.member_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("member no longer exists"))?;
    Ok(Json(member.into()))
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthMember,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<MemberData>, ApiError> {
    let member = Member::find_by_id(auth.member_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("member no longer exists"))?;

    let name = req
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| member.name.clone());
    let email = req
        .email
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| member.email.clone());

    if email != member.email && Member::email_exists(&email, &state.db_pool).await? {
        return Err(ApiError::conflict("email is already registered"));
    }

    let mut updated = Member::update_profile(member.id, &name, &email, &state.db_pool).await?;

    // Password change requires proving the current one.
    if let Some(new_password) = req.new_password.filter(|p| !p.trim().is_empty()) {
        let current = req.current_password.unwrap_or_default();
        if !member.verify_credentials(&current) {
            return Err(ApiError::forbidden("current password does not match"));
        }
        updated = Member::change_password(member.id, &new_password, &state.db_pool).await?;
        info!(username = %updated.username, "password changed");
    }

    Ok(Json(updated.into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    auth: AuthMember,
) -> Result<StatusCode, ApiError> {
    Member::delete(auth.member_id, &state.db_pool).await?;
    state.sessions.delete_member_sessions(auth.member_id).await;
    info!(username = %auth.username, "account deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct MyBooksQuery {
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MyBooksResponse {
    pub books: Vec<BookData>,
    pub average_rating: Option<f64>,
    pub status: Option<String>,
}

pub async fn my_books(
    State(state): State<AppState>,
    auth: AuthMember,
    Query(query): Query<MyBooksQuery>,
) -> Result<Json<MyBooksResponse>, ApiError> {
    let books = match query.status.as_deref().filter(|s| !s.is_empty()) {
        Some(status) => {
            status
                .parse::<ReadingStatus>()
                .map_err(|_| ApiError::validation("unknown reading status"))?;
            Book::find_by_member_and_status(auth.member_id, status, &state.db_pool).await?
        }
        None => Book::find_by_member(auth.member_id, &state.db_pool).await?,
    };

    let average = average_rating(&books);

    Ok(Json(MyBooksResponse {
        books: books.into_iter().map(BookData::from).collect(),
        average_rating: average,
        status: query.status,
    }))
}
