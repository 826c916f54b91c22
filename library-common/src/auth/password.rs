//! Salted one-way password hashing.

pub use bcrypt::BcryptError;

/// Work factor for newly created password hashes.
pub const HASH_COST: u32 = 10;

/// Hashes a plaintext password for persistence.
///
/// # Errors
///
/// Returns a [`BcryptError`] if hashing fails.
pub fn hash(plaintext: &str) -> Result<String, BcryptError> {
    bcrypt::hash(plaintext, HASH_COST)
}

/// Verifies a plaintext password against a stored hash.
///
/// # Errors
///
/// Returns a [`BcryptError`] if the stored hash cannot be parsed.
pub fn verify(plaintext: &str, hash: &str) -> Result<bool, BcryptError> {
    bcrypt::verify(plaintext, hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash("correct horse battery staple").unwrap();
        assert_ne!(hashed, "correct horse battery staple");
        assert!(verify("correct horse battery staple", &hashed).unwrap());
        assert!(!verify("incorrect horse", &hashed).unwrap());
    }

    #[test]
    fn test_verify_rejects_invalid_hash() {
        assert!(verify("anything", "not-a-bcrypt-hash").is_err());
    }
}
