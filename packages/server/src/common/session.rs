use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Session token (random UUID)
pub type SessionToken = String;

/// Session data stored after a successful login
#[derive(Clone, Debug)]
pub struct Session {
    pub member_id: Uuid,
    pub username: String,
    pub name: String,
    pub role: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// In-memory session store
///
/// Sessions expire after 24 hours
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<SessionToken, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a new session and return the token
    pub async fn create_session(&self, session: Session) -> SessionToken {
        let token = Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);
        token
    }

    /// Get session by token
    pub async fn get_session(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(token)?;

        // Check if session is expired (24 hours)
        let now = chrono::Utc::now();
        let elapsed = now.signed_duration_since(session.created_at);
        if elapsed.num_hours() >= 24 {
            return None;
        }

        Some(session.clone())
    }

    /// Delete session (logout)
    pub async fn delete_session(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }

    /// Delete every session belonging to a member (account deletion)
    pub async fn delete_member_sessions(&self, member_id: Uuid) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.member_id != member_id);
    }

    /// Clean up expired sessions (run periodically)
    pub async fn cleanup_expired(&self) {
        let mut sessions = self.sessions.write().await;
        let now = chrono::Utc::now();

        sessions.retain(|_, session| {
            let elapsed = now.signed_duration_since(session.created_at);
            elapsed.num_hours() < 24
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session {
            member_id: Uuid::new_v4(),
            username: "reader1".to_string(),
            name: "독서가".to_string(),
            role: "user".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_session_creation() {
        let store = SessionStore::new();
        let s = session();

        let token = store.create_session(s.clone()).await;
        assert!(!token.is_empty());

        let retrieved = store.get_session(&token).await;
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().username, s.username);
    }

    #[tokio::test]
    async fn test_session_expiration() {
        let store = SessionStore::new();
        let mut s = session();
        s.created_at = chrono::Utc::now() - chrono::Duration::hours(25);

        let token = store.create_session(s).await;
        let retrieved = store.get_session(&token).await;
        assert!(retrieved.is_none(), "Expired session should return None");
    }

    #[tokio::test]
    async fn test_delete_member_sessions() {
        let store = SessionStore::new();
        let s = session();
        let member_id = s.member_id;

        let token_a = store.create_session(s.clone()).await;
        let token_b = store.create_session(s).await;
        let other = store.create_session(session()).await;

        store.delete_member_sessions(member_id).await;

        assert!(store.get_session(&token_a).await.is_none());
        assert!(store.get_session(&token_b).await.is_none());
        assert!(store.get_session(&other).await.is_some());
    }
}
