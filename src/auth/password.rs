//! Password hashing and verification using bcrypt

use thiserror::Error;

/// Password hashing errors
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hashing failed: {0}")]
    HashingFailed(String),
}

/// Hash a plaintext password
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    bcrypt::hash(plain, bcrypt::DEFAULT_COST).map_err(|e| PasswordError::HashingFailed(e.to_string()))
}

/// Verify a plaintext password against a stored hash.
///
/// An unparseable hash verifies as false rather than erroring.
pub fn verify_password(plain: &str, hashed: &str) -> bool {
    bcrypt::verify(plain, hashed).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("s3cret-passphrase").unwrap();
        assert_ne!(hash, "s3cret-passphrase");
        assert!(verify_password("s3cret-passphrase", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_verify_with_garbage_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
