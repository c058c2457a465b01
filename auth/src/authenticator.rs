use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::SignedToken;
use crate::jwt::TokenCodec;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance and verification.
///
/// Holds the only process-wide secrets (signing key and token lifetimes),
/// all of which are immutable after construction, so one instance can be
/// shared across concurrent callers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    clock: Arc<dyn Clock>,
    lifetimes: TokenLifetimes,
}

/// Access and refresh validity durations.
///
/// The access window of a token is `[iat, exp)`; the refresh window is
/// `[iat, iat + refresh)`. Requiring `refresh >= access` keeps the first a
/// subset of the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    access: Duration,
    refresh: Duration,
}

impl TokenLifetimes {
    /// `exp` is a whole-second NumericDate, so the access lifetime must be
    /// whole seconds for `exp - iat` to equal it exactly.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - Access shorter than one second or not a
    ///   whole number of seconds, or refresh shorter than access
    pub fn new(access: Duration, refresh: Duration) -> Result<Self, JwtError> {
        if access < Duration::seconds(1) {
            return Err(JwtError::InvalidConfiguration(format!(
                "access validity must be at least one second, got {}ms",
                access.num_milliseconds()
            )));
        }
        if access.subsec_nanos() != 0 {
            return Err(JwtError::InvalidConfiguration(format!(
                "access validity must be a whole number of seconds, got {}ms",
                access.num_milliseconds()
            )));
        }
        if refresh < access {
            return Err(JwtError::InvalidConfiguration(format!(
                "refresh validity ({}ms) must not be shorter than access validity ({}ms)",
                refresh.num_milliseconds(),
                access.num_milliseconds()
            )));
        }

        Ok(Self { access, refresh })
    }

    pub fn from_millis(access_millis: u64, refresh_millis: u64) -> Result<Self, JwtError> {
        let to_duration = |millis: u64| {
            i64::try_from(millis)
                .ok()
                .and_then(Duration::try_milliseconds)
                .ok_or_else(|| {
                    JwtError::InvalidConfiguration(format!("validity {}ms is out of range", millis))
                })
        };

        Self::new(to_duration(access_millis)?, to_duration(refresh_millis)?)
    }

    pub fn access(&self) -> Duration {
        self.access
    }

    pub fn refresh(&self) -> Duration {
        self.refresh
    }
}

/// Which validity window a verification checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenWindow {
    /// Valid until `exp`.
    Access,
    /// Valid until `iat + refresh`.
    Refresh,
}

/// Where a token stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Signature ok and `now < exp`.
    ValidAccess,
    /// Signature ok and `exp <= now < iat + refresh`.
    ValidRefreshOnly,
    /// Bad signature, past the refresh window, or structurally broken.
    Invalid,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// `jti` of the access token
    pub token_id: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token signature is invalid or the token has expired")]
    Unauthenticated,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator reading the wall clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing, at least 64 bytes
    /// * `lifetimes` - Access and refresh validity
    ///
    /// # Errors
    /// * `InvalidKey` - Secret too short for HS512
    pub fn new(jwt_secret: &[u8], lifetimes: TokenLifetimes) -> Result<Self, JwtError> {
        Self::with_clock(jwt_secret, lifetimes, Arc::new(SystemClock))
    }

    /// Same as [`Authenticator::new`] with an explicit time source.
    pub fn with_clock(
        jwt_secret: &[u8],
        lifetimes: TokenLifetimes,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(jwt_secret)?,
            clock,
            lifetimes,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash; malformed hashes never match.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Username written into `sub`
    /// * `scope` - Role name written into `scope` (may be empty)
    ///
    /// # Returns
    /// AuthenticationResult with access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        scope: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(subject, scope)?)
    }

    /// Issue an access token without password verification.
    ///
    /// Claims are `sub = subject`, `iss = "Mercury.com"`, `iat = now`,
    /// `exp = now + access`, a fresh v4 UUID as `jti`, and `scope`.
    ///
    /// # Errors
    /// * `InvalidClaims` - Empty subject
    /// * `SigningFailed` - MAC computation failed
    pub fn issue_token(&self, subject: &str, scope: &str) -> Result<AuthenticationResult, JwtError> {
        let claims =
            Claims::for_subject(subject, self.clock.now(), self.lifetimes.access).with_scope(scope);
        let access_token = self.token_codec.issue(&claims)?;

        Ok(AuthenticationResult {
            access_token,
            expires_at: claims.expires_at(),
            token_id: claims.jti,
        })
    }

    /// Parse a token and check it against one validity window.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `window` - `Access` cuts off at `exp`, `Refresh` at `iat + refresh`
    ///
    /// # Returns
    /// The parsed token when the signature matches and the window is still open
    ///
    /// # Errors
    /// * `Unauthenticated` - Signature mismatch or window closed
    /// * `JwtError` - Token is structurally malformed
    pub fn verify_token(
        &self,
        token: &str,
        window: TokenWindow,
    ) -> Result<SignedToken, AuthenticationError> {
        let signed = self.token_codec.parse(token)?;
        let verified = self.token_codec.verify(&signed);

        let claims = signed.claims();
        let valid_until = match window {
            TokenWindow::Access => claims.expires_at(),
            TokenWindow::Refresh => claims
                .issued_at()
                .checked_add_signed(self.lifetimes.refresh)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        if verified && valid_until > self.clock.now() {
            Ok(signed)
        } else {
            Err(AuthenticationError::Unauthenticated)
        }
    }

    /// Classify a token against both windows at the current instant.
    pub fn classify(&self, token: &str) -> TokenState {
        if self.verify_token(token, TokenWindow::Access).is_ok() {
            TokenState::ValidAccess
        } else if self.verify_token(token, TokenWindow::Refresh).is_ok() {
            TokenState::ValidRefreshOnly
        } else {
            TokenState::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::clock::ManualClock;
    use crate::jwt::DEFAULT_ISSUER;

    const SECRET: &[u8] = b"test-secret-key-for-hs512-signing-must-be-at-least-sixty-four-bytes-long";

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    fn authenticator_at(clock: Arc<ManualClock>) -> Authenticator {
        let lifetimes = TokenLifetimes::new(Duration::seconds(60), Duration::seconds(3600)).unwrap();
        Authenticator::with_clock(SECRET, lifetimes, clock).expect("Failed to build authenticator")
    }

    #[test]
    fn test_authenticate_success() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock);

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("my_password", &hash, "alice", "USER")
            .expect("Authentication failed");
        assert!(!result.access_token.is_empty());
        assert_eq!(result.expires_at, start() + Duration::seconds(60));

        let signed = authenticator
            .verify_token(&result.access_token, TokenWindow::Access)
            .expect("Token validation failed");
        let claims = signed.claims();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.iss, DEFAULT_ISSUER);
        assert_eq!(claims.scope, "USER");
        assert_eq!(claims.jti, result.token_id);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock);

        let hash = authenticator.hash_password("my_password").unwrap();

        let result = authenticator.authenticate("wrong_password", &hash, "alice", "USER");
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_each_issuance_gets_fresh_token_id() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock);

        let first = authenticator.issue_token("alice", "").unwrap();
        let second = authenticator.issue_token("alice", "").unwrap();

        assert_ne!(first.token_id, second.token_id);
        assert_ne!(first.access_token, second.access_token);
    }

    #[test]
    fn test_access_window_closes_at_exp() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock.clone());
        let token = authenticator.issue_token("alice", "USER").unwrap().access_token;

        clock.advance(Duration::seconds(59));
        assert!(authenticator.verify_token(&token, TokenWindow::Access).is_ok());

        clock.advance(Duration::seconds(1));
        assert!(matches!(
            authenticator.verify_token(&token, TokenWindow::Access),
            Err(AuthenticationError::Unauthenticated)
        ));
    }

    #[test]
    fn test_refresh_window_outlives_access_window() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock.clone());
        let token = authenticator.issue_token("alice", "USER").unwrap().access_token;

        clock.advance(Duration::seconds(120));
        assert!(authenticator.verify_token(&token, TokenWindow::Access).is_err());
        assert!(authenticator.verify_token(&token, TokenWindow::Refresh).is_ok());

        clock.set(start() + Duration::seconds(3600));
        assert!(matches!(
            authenticator.verify_token(&token, TokenWindow::Refresh),
            Err(AuthenticationError::Unauthenticated)
        ));
    }

    #[test]
    fn test_access_window_is_subset_of_refresh_window() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock.clone());
        let token = authenticator.issue_token("alice", "").unwrap().access_token;

        for offset in [0, 1, 30, 59, 60, 61, 600, 3599, 3600, 3700] {
            clock.set(start() + Duration::seconds(offset));
            let access = authenticator.verify_token(&token, TokenWindow::Access).is_ok();
            let refresh = authenticator.verify_token(&token, TokenWindow::Refresh).is_ok();
            assert!(!access || refresh, "offset {}s accepted by access only", offset);
        }
    }

    #[test]
    fn test_classify_walks_through_states() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock.clone());
        let token = authenticator.issue_token("alice", "").unwrap().access_token;

        assert_eq!(authenticator.classify(&token), TokenState::ValidAccess);

        clock.advance(Duration::seconds(120));
        assert_eq!(authenticator.classify(&token), TokenState::ValidRefreshOnly);

        clock.advance(Duration::seconds(3600));
        assert_eq!(authenticator.classify(&token), TokenState::Invalid);

        assert_eq!(authenticator.classify("not-a-token"), TokenState::Invalid);
    }

    #[test]
    fn test_token_from_other_key_is_unauthenticated() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock.clone());
        let other = Authenticator::with_clock(
            b"another-secret-key-for-hs512-signing-must-be-at-least-sixty-four-bytes!!",
            TokenLifetimes::new(Duration::seconds(60), Duration::seconds(3600)).unwrap(),
            clock,
        )
        .unwrap();

        let token = other.issue_token("alice", "").unwrap().access_token;
        assert!(matches!(
            authenticator.verify_token(&token, TokenWindow::Access),
            Err(AuthenticationError::Unauthenticated)
        ));
    }

    #[test]
    fn test_malformed_token_is_a_jwt_error() {
        let clock = Arc::new(ManualClock::new(start()));
        let authenticator = authenticator_at(clock);

        let result = authenticator.verify_token("invalid.token.here", TokenWindow::Refresh);
        assert!(matches!(
            result,
            Err(AuthenticationError::JwtError(JwtError::MalformedToken(_)))
        ));
    }

    #[test]
    fn test_lifetimes_validation() {
        assert!(TokenLifetimes::new(Duration::seconds(60), Duration::seconds(60)).is_ok());
        assert!(TokenLifetimes::new(Duration::seconds(60), Duration::seconds(59)).is_err());
        assert!(TokenLifetimes::new(Duration::milliseconds(500), Duration::seconds(60)).is_err());

        let lifetimes = TokenLifetimes::from_millis(60_000, 3_600_000).unwrap();
        assert_eq!(lifetimes.access(), Duration::seconds(60));
        assert_eq!(lifetimes.refresh(), Duration::seconds(3600));
        assert!(TokenLifetimes::from_millis(u64::MAX, u64::MAX).is_err());
    }

    #[test]
    fn test_fractional_access_lifetime_rejected() {
        assert!(matches!(
            TokenLifetimes::from_millis(1500, 3_600_000),
            Err(JwtError::InvalidConfiguration(_))
        ));
        // Refresh is compared at full precision and may carry milliseconds
        assert!(TokenLifetimes::from_millis(2000, 3_600_500).is_ok());
    }

    #[test]
    fn test_token_lifetime_matches_access_validity() {
        let clock = Arc::new(ManualClock::new(start() + Duration::milliseconds(900)));
        let lifetimes = TokenLifetimes::from_millis(2000, 3_600_000).unwrap();
        let authenticator = Authenticator::with_clock(SECRET, lifetimes, clock.clone()).unwrap();

        let token = authenticator.issue_token("alice", "").unwrap().access_token;
        let signed = authenticator
            .verify_token(&token, TokenWindow::Access)
            .expect("Fresh token rejected");
        assert_eq!(signed.claims().exp - signed.claims().iat, 2);

        clock.advance(Duration::milliseconds(200));
        assert!(authenticator.verify_token(&token, TokenWindow::Access).is_ok());
    }

    #[test]
    fn test_short_secret_rejected() {
        let lifetimes = TokenLifetimes::new(Duration::seconds(60), Duration::seconds(3600)).unwrap();
        let result = Authenticator::new(b"test_secret_key_at_least_32_bytes!", lifetimes);
        assert!(matches!(result, Err(JwtError::InvalidKey { .. })));
    }
}
