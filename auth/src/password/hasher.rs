use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides adaptive, salted password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// bcrypt work factor used for new hashes.
    pub const DEFAULT_COST: u32 = 10;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with work factor 10
    pub fn new() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh salt is generated on every call, so hashing the same password
    /// twice yields two different strings of the same length.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// Modular crypt string (`$2b$10$...`) embedding cost and salt
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Rehashes with the salt and cost embedded in `hash`. A malformed stored
    /// hash never matches.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
