use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Generate a random per-member salt.
pub fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Digest a password with its salt.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Check a password attempt against the stored salt + digest.
pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    hash_password(salt, password) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let salt = generate_salt();
        let hash = hash_password(&salt, "secret-password");

        assert!(verify_password(&salt, "secret-password", &hash));
        assert!(!verify_password(&salt, "wrong-password", &hash));
    }

    #[test]
    fn test_same_password_different_salt_differs() {
        let hash_a = hash_password(&generate_salt(), "secret");
        let hash_b = hash_password(&generate_salt(), "secret");
        assert_ne!(hash_a, hash_b);
    }

    #[test]
    fn test_hash_is_hex_digest() {
        let hash = hash_password("salt", "password");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
