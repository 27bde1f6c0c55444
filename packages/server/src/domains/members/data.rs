use crate::domains::members::models::Member;
use serde::{Deserialize, Serialize};

/// API representation of a member; never carries the password digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: String,
}

impl From<Member> for MemberData {
    fn from(member: Member) -> Self {
        Self {
            id: member.id.to_string(),
            username: member.username,
            email: member.email,
            name: member.name,
            role: member.role,
            created_at: member.created_at.to_rfc3339(),
        }
    }
}
