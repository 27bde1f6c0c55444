//! Comment routes, nested under posts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::comments::{Comment, CommentData};
use crate::domains::posts::Post;
use crate::server::app::AppState;
use crate::server::auth::AuthMember;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub content: String,
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthMember,
    Path(post_id): Path<Uuid>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentData>), ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::validation("content is required"));
    }

    // 404 before insert: commenting on a deleted post is not an error page
    Post::find_by_id(post_id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let comment = Comment::create(post_id, auth.member_id, req.content.trim(), &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

pub async fn remove(
    State(state): State<AppState>,
    auth: AuthMember,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let comment = Comment::find_by_id(comment_id, &state.db_pool)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or_else(|| ApiError::not_found("comment not found"))?;

    if comment.member_id != auth.member_id {
        return Err(ApiError::forbidden("only the author can delete this comment"));
    }

    Comment::delete(comment_id, &state.db_pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
