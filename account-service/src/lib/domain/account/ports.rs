use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::account::models::EmailAddress;
use crate::account::models::NewUser;
use crate::account::models::PhoneNumber;
use crate::account::models::Role;
use crate::account::models::RoleId;
use crate::account::models::User;
use crate::account::models::Username;

/// Persistence operations for the account aggregate.
///
/// Every lookup is an exact equality match on its column.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account in a single atomic write.
    ///
    /// # Arguments
    /// * `user` - Account to create
    ///
    /// # Returns
    /// Created account with its assigned id
    ///
    /// # Errors
    /// * `UserExisted` - Username, email or phone collides with an existing row
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, AuthError>;

    /// Retrieve account by username.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;

    /// Retrieve account by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError>;

    /// Retrieve account by phone number.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, AuthError>;

    /// Retrieve the account whose username, email or phone equals `identifier`.
    ///
    /// When several accounts match, a username match wins over an email
    /// match, which wins over a phone match.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AuthError>;
}

/// Read access to role records.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, AuthError>;
}
