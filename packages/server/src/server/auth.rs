//! Bearer-session authentication extractor.

use axum::{async_trait, extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use uuid::Uuid;

use crate::common::ApiError;
use crate::server::app::AppState;

/// The authenticated member resolved from the `Authorization: Bearer`
/// session token. Handlers that take this as an argument reject
/// unauthenticated requests with 401.
#[derive(Clone, Debug)]
pub struct AuthMember {
    pub member_id: Uuid,
    pub username: String,
    pub name: String,
    pub role: String,
    /// The session token itself, kept for logout.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthMember {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Valid session token required"))?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header);

        let session = state
            .sessions
            .get_session(token)
            .await
            .ok_or_else(|| ApiError::unauthorized("Session expired or invalid"))?;

        Ok(AuthMember {
            member_id: session.member_id,
            username: session.username,
            name: session.name,
            role: session.role,
            token: token.to_string(),
        })
    }
}
