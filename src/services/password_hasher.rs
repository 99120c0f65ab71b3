use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version};

use crate::errors::InternalError;

/// Output of hashing one password
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    /// Argon2id PHC string
    pub hash: String,
    /// Salt embedded in `hash`, kept in its own column as well
    pub salt: String,
}

/// Argon2id hashing with the application pepper as the secret parameter
pub struct PasswordHasher {
    pepper: String,
}

impl PasswordHasher {
    /// # Arguments
    /// * `pepper` - Secret from SecretManager; the same value must be used to verify
    pub fn new(pepper: impl Into<String>) -> Self {
        Self { pepper: pepper.into() }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash `password` with a freshly generated salt
    pub fn hash(&self, password: &str) -> Result<HashedPassword, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("password_hash", e.to_string()))?
            .to_string();

        Ok(HashedPassword {
            hash,
            salt: salt.as_str().to_string(),
        })
    }

    /// Check `password` against a stored PHC string
    ///
    /// A malformed hash counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, InternalError> {
        let parsed = match PasswordHash::new(hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        Ok(self.argon2()?.verify_password(password.as_bytes(), &parsed).is_ok())
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("pepper", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEPPER: &str = "test-pepper-0123456789";

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(PEPPER);
        let hashed = hasher.hash("666666").expect("Failed to hash password");

        assert!(hashed.hash.starts_with("$argon2id$"));
        assert!(hashed.hash.contains(&hashed.salt));
        assert!(hasher.verify("666666", &hashed.hash).unwrap());
        assert!(!hasher.verify("777777", &hashed.hash).unwrap());
    }

    #[test]
    fn test_fresh_salt_per_hash() {
        let hasher = PasswordHasher::new(PEPPER);
        let a = hasher.hash("secret").unwrap();
        let b = hasher.hash("secret").unwrap();

        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn test_different_pepper_fails_verification() {
        let hashed = PasswordHasher::new(PEPPER).hash("secret").unwrap();
        let other = PasswordHasher::new("another-pepper-9876543210");

        assert!(!other.verify("secret", &hashed.hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_mismatch() {
        let hasher = PasswordHasher::new(PEPPER);
        assert!(!hasher.verify("secret", "plain-text").unwrap());
    }

    #[test]
    fn test_debug_redacts_pepper() {
        let output = format!("{:?}", PasswordHasher::new(PEPPER));
        assert!(!output.contains(PEPPER));
    }
}
