use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username must not be empty")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username must not contain whitespace")]
    ContainsWhitespace,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Invalid phone number: {0}")]
    InvalidFormat(String),
}

/// Error for RoleName parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleNameError {
    #[error("Unknown role name: {0}")]
    Unknown(String),
}

/// Top-level error for all authentication operations.
///
/// Variants split into the authentication domain (returned to callers
/// verbatim) and fatal configuration or infrastructure faults; see
/// [`AuthError::is_fatal`].
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    // Domain-level errors
    #[error("Email is already taken")]
    EmailTaken,

    #[error("Phone number is already taken")]
    PhoneTaken,

    #[error("User already exists")]
    UserExisted,

    #[error("No account matches the given username, email or phone")]
    UnableToLogin,

    #[error("Password is not correct")]
    PasswordNotCorrect,

    #[error("Unauthenticated")]
    Unauthenticated,

    // Configuration and infrastructure errors
    #[error("Role not found: {0}")]
    RoleNotFound(i32),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    /// Stable symbolic name of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidUsername(_) => "INVALID_USERNAME",
            AuthError::InvalidEmail(_) => "INVALID_EMAIL",
            AuthError::InvalidPhone(_) => "INVALID_PHONE",
            AuthError::EmailTaken => "EMAIL_TAKEN",
            AuthError::PhoneTaken => "PHONE_TAKEN",
            AuthError::UserExisted => "USER_EXISTED",
            AuthError::UnableToLogin => "UNABLE_TO_LOGIN",
            AuthError::PasswordNotCorrect => "PASSWORD_NOT_CORRECT",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::RoleNotFound(_)
            | AuthError::Token(_)
            | AuthError::Password(_)
            | AuthError::DatabaseError(_) => "INTERNAL_ERROR",
        }
    }

    /// True for configuration and infrastructure faults, false for errors a
    /// client can cause or fix.
    pub fn is_fatal(&self) -> bool {
        self.code() == "INTERNAL_ERROR"
    }
}

impl From<AuthenticationError> for AuthError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AuthError::PasswordNotCorrect,
            AuthenticationError::Unauthenticated => AuthError::Unauthenticated,
            AuthenticationError::PasswordError(e) => AuthError::Password(e),
            AuthenticationError::JwtError(e) => AuthError::Token(e),
        }
    }
}
