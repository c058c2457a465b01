use thiserror::Error;

/// Error type for JWT operations.
///
/// None of these describe an expired or forged token: those are ordinary
/// verification outcomes, reported by `TokenCodec::verify` and the
/// authenticator's window checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Signing key too short: need at least {min} bytes, got {actual}")]
    InvalidKey { min: usize, actual: usize },

    #[error("Invalid token configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid claims: {0}")]
    InvalidClaims(String),

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),
}
