use crate::domains::comments::models::Comment;
use serde::{Deserialize, Serialize};

/// API representation of a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentData {
    pub id: String,
    pub post_id: String,
    pub member_id: String,
    pub author_name: String,
    pub content: String,
    pub created_at: String,
}

impl From<Comment> for CommentData {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            member_id: comment.member_id.to_string(),
            author_name: comment.author_name,
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}
