//! Recommendation orchestration: load history, pick a prompt, call the
//! completion API, parse.

use openai_client::{ChatRequest, Message, OpenAIClient};
use sqlx::PgPool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domains::books::models::Book;

use super::parse::{parse_recommendations, AiRecommendedBook};
use super::prompt::{build_personalized_prompt, build_trend_prompt, MIN_BOOKS_FOR_PERSONALIZED};

const MODEL: &str = "gpt-3.5-turbo";
const TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct RecommendService {
    openai: Option<OpenAIClient>,
    pool: PgPool,
}

impl RecommendService {
    pub fn new(openai: Option<OpenAIClient>, pool: PgPool) -> Self {
        Self { openai, pool }
    }

    /// Recommendations for one member. Degrades to an empty list on a
    /// missing API key, a failed completion call, or an unparseable
    /// answer. The widget disappears, the page renders.
    pub async fn recommendations_for(&self, member_id: Uuid, count: usize) -> Vec<AiRecommendedBook> {
        let Some(client) = &self.openai else {
            warn!("OPENAI_API_KEY not configured; AI recommendations disabled");
            return Vec::new();
        };

        let books = match Book::find_by_member(member_id, &self.pool).await {
            Ok(books) => books,
            Err(e) => {
                warn!(error = %e, %member_id, "failed to load reading history");
                return Vec::new();
            }
        };

        let prompt = if books.len() >= MIN_BOOKS_FOR_PERSONALIZED {
            debug!(%member_id, history = books.len(), "building personalized prompt");
            build_personalized_prompt(&books, count)
        } else {
            debug!(%member_id, history = books.len(), "history too small, using trend prompt");
            build_trend_prompt(count)
        };

        let request = ChatRequest::new(MODEL)
            .temperature(TEMPERATURE)
            .message(Message::user(prompt));

        match client.chat_completion(request).await {
            Ok(response) => {
                let books = parse_recommendations(&response.content);
                debug!(%member_id, count = books.len(), "AI recommendations parsed");
                books
            }
            Err(e) => {
                warn!(error = %e, %member_id, "chat completion failed");
                Vec::new()
            }
        }
    }
}
