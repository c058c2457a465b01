use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::EmailError;
use crate::account::errors::PhoneError;
use crate::account::errors::RoleNameError;
use crate::account::errors::UsernameError;

/// Role assigned to newly registered accounts ("regular user").
pub const DEFAULT_ROLE_ID: RoleId = RoleId(4);

/// Account aggregate entity.
///
/// Represents a registered user
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password_hash: String,
    pub role: Option<Role>,
    /// Activation flag; false until an activation flow flips it.
    pub status: bool,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Symbolic role name carried in the token `scope` claim, empty without a role.
    pub fn scope(&self) -> &str {
        self.role.as_ref().map(|role| role.name.as_str()).unwrap_or("")
    }
}

/// Account that has not been persisted yet (no id assigned).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password_hash: String,
    pub role: Option<Role>,
    pub status: bool,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            phone: self.phone,
            password_hash: self.password_hash,
            role: self.role,
            status: self.status,
            profile: self.profile,
            created_at: self.created_at,
        }
    }
}

/// Optional profile data collected at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub full_name: Option<String>,
    pub address: Option<String>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Non-empty, at most 50 characters, no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MAX_LENGTH: usize = 50;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `Empty` - Username is empty
    /// * `TooLong` - Username longer than 50 characters
    /// * `ContainsWhitespace` - Username contains whitespace
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let length = username.chars().count();
        if length == 0 {
            Err(UsernameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else if username.chars().any(char::is_whitespace) {
            Err(UsernameError::ContainsWhitespace)
        } else {
            Ok(Self(username))
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Phone number type
///
/// Optional leading `+` followed by 3 to 20 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 3;
    const MAX_DIGITS: usize = 20;

    /// # Errors
    /// * `InvalidFormat` - Not a `+`-prefixed or bare digit string of valid length
    pub fn new(phone: String) -> Result<Self, PhoneError> {
        let digits = phone.strip_prefix('+').unwrap_or(&phone);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::InvalidFormat(
                "only digits and an optional leading '+' are allowed".to_string(),
            ));
        }
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(PhoneError::InvalidFormat(format!(
                "expected {} to {} digits, got {}",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS,
                digits.len()
            )));
        }

        Ok(Self(phone))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub i32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Symbolic role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleName {
    Admin,
    Staff,
    Seller,
    User,
}

impl RoleName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::Admin => "ADMIN",
            RoleName::Staff => "STAFF",
            RoleName::Seller => "SELLER",
            RoleName::User => "USER",
        }
    }
}

impl FromStr for RoleName {
    type Err = RoleNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(RoleName::Admin),
            "STAFF" => Ok(RoleName::Staff),
            "SELLER" => Ok(RoleName::Seller),
            "USER" => Ok(RoleName::User),
            other => Err(RoleNameError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role record, read-only from the service's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password: String,
    pub profile: UserProfile,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `phone` - Validated phone number
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(
        username: Username,
        email: EmailAddress,
        phone: PhoneNumber,
        password: String,
    ) -> Self {
        Self {
            username,
            email,
            phone,
            password,
            profile: UserProfile::default(),
        }
    }

    pub fn with_profile(mut self, profile: UserProfile) -> Self {
        self.profile = profile;
        self
    }
}

/// Login attempt.
///
/// `identifier` is matched against username, email and phone alike.
#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(identifier: String, password: String) -> Self {
        Self {
            identifier,
            password,
        }
    }
}

/// Outcome of a successful register or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResponse {
    pub token: String,
    pub authenticated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrospectResponse {
    pub valid: bool,
}

/// What logout observed about the presented token.
///
/// Logout has no server-side effect either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    LoggedOut { token_id: String, subject: String },
    AlreadyExpired,
}
