//! Authentication utilities library
//!
//! Provides the stateless token authentication building blocks:
//! - Password hashing (bcrypt, work factor 10)
//! - Compact HS512 token signing, parsing and verification
//! - Access/refresh window policy on top of an injectable clock
//!
//! Services own their account storage and error vocabulary and adapt these
//! implementations; nothing here touches persistence.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec};
//! use chrono::{Duration, Utc};
//!
//! let secret = [7u8; 64];
//! let codec = TokenCodec::new(&secret).unwrap();
//! let claims = Claims::for_subject("alice", Utc::now(), Duration::minutes(15));
//! let token = codec.issue(&claims).unwrap();
//!
//! let signed = codec.parse(&token).unwrap();
//! assert!(codec.verify(&signed));
//! assert_eq!(signed.claims().sub, "alice");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenLifetimes, TokenWindow};
//!
//! let lifetimes = TokenLifetimes::from_millis(60_000, 3_600_000).unwrap();
//! let auth = Authenticator::new(&[7u8; 64], lifetimes).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice", "USER").unwrap();
//!
//! // Validate token against the access window
//! let signed = auth.verify_token(&result.access_token, TokenWindow::Access).unwrap();
//! assert_eq!(signed.token_id(), result.token_id);
//! ```

pub mod authenticator;
pub mod clock;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenState;
pub use authenticator::TokenWindow;
pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SystemClock;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::SignedToken;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
