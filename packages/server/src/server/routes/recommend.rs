//! AI recommendation feed.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::domains::recommend::AiRecommendedBook;
use crate::server::app::AppState;
use crate::server::auth::AuthMember;

/// The completion provider is asked for at most this many titles.
const MAX_AI_COUNT: usize = 10;

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<usize>,
}

/// Personalized (or trend) picks for the signed-in member. Always 200;
/// an unconfigured or failing provider yields an empty list.
pub async fn recommendations(
    State(state): State<AppState>,
    auth: AuthMember,
    Query(query): Query<CountQuery>,
) -> Json<Vec<AiRecommendedBook>> {
    let count = query.count.unwrap_or(5).clamp(1, MAX_AI_COUNT);
    Json(state.recommend.recommendations_for(auth.member_id, count).await)
}
