use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer written into every token this crate signs.
pub const DEFAULT_ISSUER: &str = "Mercury.com";

/// Claim set carried by an access token.
///
/// `iat` and `exp` are NumericDate values (seconds since the Unix epoch).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (username of the account)
    pub sub: String,

    /// Issuer
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique token identifier)
    #[serde(default)]
    pub jti: String,

    /// Symbolic role name, empty when the account has no role
    #[serde(default)]
    pub scope: String,
}

impl Claims {
    /// Create claims for a subject with a fresh token id.
    ///
    /// # Arguments
    /// * `subject` - Username the token is issued to
    /// * `issued_at` - Issuance instant (truncated to whole seconds)
    /// * `validity` - Access validity; `exp = iat + validity` in whole seconds
    ///
    /// # Returns
    /// Claims with sub, iss, iat, exp and jti set and an empty scope
    pub fn for_subject(subject: impl ToString, issued_at: DateTime<Utc>, validity: Duration) -> Self {
        let iat = issued_at.timestamp();

        Self {
            sub: subject.to_string(),
            iss: DEFAULT_ISSUER.to_string(),
            iat,
            exp: iat + validity.num_seconds(),
            jti: Uuid::new_v4().to_string(),
            scope: String::new(),
        }
    }

    /// Set scope.
    pub fn with_scope(mut self, scope: impl ToString) -> Self {
        self.scope = scope.to_string();
        self
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.iat)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }
}

// Out-of-range timestamps collapse to the epoch bounds so comparisons stay total.
fn timestamp_to_datetime(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(if seconds < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}
