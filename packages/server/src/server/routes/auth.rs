//! Registration, login and logout.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::{ApiError, Session};
use crate::domains::members::{Member, MemberData};
use crate::server::app::AppState;
use crate::server::auth::AuthMember;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MemberData>), ApiError> {
    if req.username.trim().is_empty() {
        return Err(ApiError::validation("username is required"));
    }
    if req.email.trim().is_empty() {
        return Err(ApiError::validation("email is required"));
    }
    if req.password.trim().is_empty() {
        return Err(ApiError::validation("password is required"));
    }

    if Member::username_exists(&req.username, &state.db_pool).await? {
        return Err(ApiError::conflict("username is already taken"));
    }
    if Member::email_exists(&req.email, &state.db_pool).await? {
        return Err(ApiError::conflict("email is already registered"));
    }

    let member = Member::create(
        &req.username,
        &req.email,
        &req.name,
        &req.password,
        &state.db_pool,
    )
    .await?;

    info!(username = %member.username, "member registered");
    Ok((StatusCode::CREATED, Json(member.into())))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub member: MemberData,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let member = Member::find_by_username(&req.username, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid username or password"))?;

    if !member.verify_credentials(&req.password) {
        return Err(ApiError::unauthorized("invalid username or password"));
    }

    let token = state
        .sessions
        .create_session(Session {
            member_id: member.id,
            username: member.username.clone(),
            name: member.name.clone(),
            role: member.role.clone(),
            created_at: Utc::now(),
        })
        .await;

    info!(username = %member.username, "member logged in");
    Ok(Json(LoginResponse {
        token,
        member: member.into(),
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    auth: AuthMember,
) -> Result<StatusCode, ApiError> {
    state.sessions.delete_session(&auth.token).await;
    Ok(StatusCode::NO_CONTENT)
}
