use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AuthError;
use crate::account::models::EmailAddress;
use crate::account::models::NewUser;
use crate::account::models::PhoneNumber;
use crate::account::models::Role;
use crate::account::models::RoleId;
use crate::account::models::RoleName;
use crate::account::models::User;
use crate::account::models::UserId;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;

/// Process-local account store.
///
/// Backs the server when no database is configured and the integration
/// tests. Enforces the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn find_where<F>(&self, predicate: F) -> Option<User>
    where
        F: Fn(&User) -> bool,
    {
        self.users.read().await.iter().find(|u| predicate(u)).cloned()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| {
            u.username == user.username || u.email == user.email || u.phone == user.phone
        }) {
            return Err(AuthError::UserExisted);
        }

        let id = UserId(users.len() as i64 + 1);
        let user = user.with_id(id);
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
        Ok(self.find_where(|u| &u.username == username).await)
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, AuthError> {
        Ok(self.find_where(|u| &u.email == email).await)
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, AuthError> {
        Ok(self.find_where(|u| &u.phone == phone).await)
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<User>, AuthError> {
        if let Some(user) = self.find_where(|u| u.username.as_str() == identifier).await {
            return Ok(Some(user));
        }
        if let Some(user) = self.find_where(|u| u.email.as_str() == identifier).await {
            return Ok(Some(user));
        }
        Ok(self.find_where(|u| u.phone.as_str() == identifier).await)
    }
}

/// Process-local role store.
#[derive(Default)]
pub struct InMemoryRoleRepository {
    roles: RwLock<HashMap<RoleId, Role>>,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded with the four standard roles: 1 ADMIN, 2 STAFF, 3 SELLER, 4 USER.
    pub fn with_default_roles() -> Self {
        let roles = [
            (1, RoleName::Admin),
            (2, RoleName::Staff),
            (3, RoleName::Seller),
            (4, RoleName::User),
        ]
        .into_iter()
        .map(|(id, name)| (RoleId(id), Role { id: RoleId(id), name }))
        .collect();

        Self {
            roles: RwLock::new(roles),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_id(&self, id: RoleId) -> Result<Option<Role>, AuthError> {
        Ok(self.roles.read().await.get(&id).cloned())
    }
}
