use crate::domains::posts::models::Post;
use serde::{Deserialize, Serialize};

/// API representation of a board post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostData {
    pub id: String,
    pub member_id: String,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub view_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            member_id: post.member_id.to_string(),
            author_name: post.author_name,
            title: post.title,
            content: post.content,
            category: post.category,
            view_count: post.view_count,
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}
