// Password hashing utilities
// Uses bcrypt for secure password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Hashes a password using bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String, String> {
    hash(password, DEFAULT_COST).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("toycathon-pass-1").expect("valid hash");
        assert!(verify_password("toycathon-pass-1", &hash).expect("valid verification"));
    }

    #[test]
    fn verify_wrong_password() {
        let hash = hash_password("toycathon-pass-1").expect("valid hash");
        assert!(!verify_password("wrong-password", &hash).expect("valid verification"));
    }

    #[test]
    fn hashes_are_salted() {
        let hash1 = hash_password("toycathon-pass-1").expect("valid hash");
        let hash2 = hash_password("toycathon-pass-1").expect("valid hash");

        assert_ne!(hash1, hash2);
        assert!(verify_password("toycathon-pass-1", &hash1).unwrap());
        assert!(verify_password("toycathon-pass-1", &hash2).unwrap());
    }
}
