//! Community board routes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::common::ApiError;
use crate::domains::comments::{Comment, CommentData};
use crate::domains::posts::{Post, PostData, PostDraft};
use crate::server::app::AppState;
use crate::server::auth::AuthMember;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub keyword: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostData>>, ApiError> {
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let keyword = query.keyword.as_deref().filter(|k| !k.trim().is_empty());

    let posts = match (keyword, category) {
        (Some(keyword), category) => Post::search(keyword, category, &state.db_pool).await?,
        (None, Some(category)) => Post::find_by_category(category, &state.db_pool).await?,
        (None, None) => Post::find_all_recent(&state.db_pool).await?,
    };

    Ok(Json(posts.into_iter().map(PostData::from).collect()))
}

fn validate_draft(draft: &PostDraft) -> Result<(), ApiError> {
    if draft.title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }
    if draft.content.trim().is_empty() {
        return Err(ApiError::validation("content is required"));
    }
    Ok(())
}

pub async fn create(
    State(state): State<AppState>,
    auth: AuthMember,
    Json(draft): Json<PostDraft>,
) -> Result<(StatusCode, Json<PostData>), ApiError> {
    validate_draft(&draft)?;
    let post = Post::create(auth.member_id, &draft, &state.db_pool).await?;
    info!(member = %auth.username, post_id = %post.id, "post created");
    Ok((StatusCode::CREATED, Json(post.into())))
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostData,
    pub comments: Vec<CommentData>,
    pub comment_count: usize,
}

/// Post detail. Reading a post counts as a view.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostDetailResponse>, ApiError> {
    let post = Post::find_by_id_and_bump(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let comments = Comment::find_by_post(post.id, &state.db_pool).await?;
    let comment_count = comments.len();

    Ok(Json(PostDetailResponse {
        post: post.into(),
        comments: comments.into_iter().map(CommentData::from).collect(),
        comment_count,
    }))
}

pub async fn update(
    State(state): State<AppState>,
    auth: AuthMember,
    Path(id): Path<Uuid>,
    Json(draft): Json<PostDraft>,
) -> Result<Json<PostData>, ApiError> {
    validate_draft(&draft)?;

    let post = Post::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;
    if post.member_id != auth.member_id {
        return Err(ApiError::forbidden("only the author can edit this post"));
    }

    let updated = Post::update(id, &draft, &state.db_pool).await?;
    Ok(Json(updated.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    auth: AuthMember,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let post = Post::find_by_id(id, &state.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;
    if post.member_id != auth.member_id {
        return Err(ApiError::forbidden("only the author can delete this post"));
    }

    Post::delete(id, &state.db_pool).await?;
    info!(member = %auth.username, post_id = %id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
