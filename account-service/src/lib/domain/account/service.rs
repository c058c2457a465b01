use std::sync::Arc;

use auth::AuthenticationError;
use auth::Authenticator;
use auth::TokenWindow;
use chrono::Utc;

use crate::account::errors::AuthError;
use crate::account::models::AuthenticationResponse;
use crate::account::models::IntrospectResponse;
use crate::account::models::LoginCommand;
use crate::account::models::LogoutOutcome;
use crate::account::models::NewUser;
use crate::account::models::RegisterCommand;
use crate::account::models::RoleId;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;

/// Stateless token authentication: register, login, introspect, logout.
///
/// Shares only read-only state (the authenticator's key and lifetimes)
/// between calls; store handles are per call.
pub struct AuthenticationService<AR, RR>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    accounts: Arc<AR>,
    roles: Arc<RR>,
    authenticator: Arc<Authenticator>,
    default_role_id: RoleId,
}

impl<AR, RR> AuthenticationService<AR, RR>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `accounts` - Account persistence implementation
    /// * `roles` - Role lookup implementation
    /// * `authenticator` - Password and token policy
    /// * `default_role_id` - Role assigned on registration
    pub fn new(
        accounts: Arc<AR>,
        roles: Arc<RR>,
        authenticator: Arc<Authenticator>,
        default_role_id: RoleId,
    ) -> Self {
        Self {
            accounts,
            roles,
            authenticator,
            default_role_id,
        }
    }

    /// Create an account and sign it in.
    ///
    /// Uniqueness is checked email first, then phone, then username, and the
    /// first collision is reported. The account is stored inactive with the
    /// default role in a single write.
    ///
    /// # Errors
    /// * `EmailTaken` / `PhoneTaken` / `UserExisted` - Uniqueness violation
    /// * `RoleNotFound` - Default role missing from the role store (fatal)
    /// * `Password`, `Token`, `DatabaseError` - Infrastructure faults (fatal)
    pub async fn register(
        &self,
        command: RegisterCommand,
    ) -> Result<AuthenticationResponse, AuthError> {
        if self.accounts.find_by_email(&command.email).await?.is_some() {
            tracing::info!(email = %command.email, "Registration rejected: email taken");
            return Err(AuthError::EmailTaken);
        }

        if self.accounts.find_by_phone(&command.phone).await?.is_some() {
            tracing::info!(phone = %command.phone, "Registration rejected: phone taken");
            return Err(AuthError::PhoneTaken);
        }

        if self
            .accounts
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration rejected: username taken");
            return Err(AuthError::UserExisted);
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let role = self
            .roles
            .find_by_id(self.default_role_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(role_id = %self.default_role_id, "Default role is not configured");
                AuthError::RoleNotFound(self.default_role_id.0)
            })?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            phone: command.phone,
            password_hash,
            role: Some(role),
            status: false,
            profile: command.profile,
            created_at: Utc::now(),
        };

        let user = self.accounts.create(new_user).await?;
        let issued = self
            .authenticator
            .issue_token(user.username.as_str(), user.scope())?;

        tracing::info!(
            user_id = %user.id,
            username = %user.username,
            token_id = %issued.token_id,
            "Account registered"
        );

        Ok(AuthenticationResponse {
            token: issued.access_token,
            authenticated: true,
        })
    }

    /// Verify credentials and issue a fresh token.
    ///
    /// The identifier may be a username, an email or a phone number. The
    /// account's activation status is not consulted.
    ///
    /// # Errors
    /// * `UnableToLogin` - No account matches the identifier
    /// * `PasswordNotCorrect` - Account found, password mismatch
    /// * `Token`, `DatabaseError` - Infrastructure faults (fatal)
    pub async fn login(&self, command: LoginCommand) -> Result<AuthenticationResponse, AuthError> {
        let user = self
            .accounts
            .find_by_identifier(&command.identifier)
            .await?
            .ok_or_else(|| {
                tracing::info!("Login rejected: no matching account");
                AuthError::UnableToLogin
            })?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                user.username.as_str(),
                user.scope(),
            )
            .map_err(|e| {
                if matches!(e, AuthenticationError::InvalidCredentials) {
                    tracing::info!(user_id = %user.id, "Login rejected: wrong password");
                }
                AuthError::from(e)
            })?;

        tracing::info!(
            user_id = %user.id,
            token_id = %result.token_id,
            "User logged in"
        );

        Ok(AuthenticationResponse {
            token: result.access_token,
            authenticated: true,
        })
    }

    /// Report whether a token is currently inside its access window.
    ///
    /// Never fails: forged, expired and malformed tokens are all just invalid.
    pub fn introspect(&self, token: &str) -> IntrospectResponse {
        match self.authenticator.verify_token(token, TokenWindow::Access) {
            Ok(_) => IntrospectResponse { valid: true },
            Err(e) => {
                tracing::debug!(error = %e, "Token failed introspection");
                IntrospectResponse { valid: false }
            }
        }
    }

    /// Log out a token that is still inside its refresh window.
    ///
    /// Nothing is persisted: the token stays cryptographically valid until
    /// it expires naturally. A token past its window (or with a bad
    /// signature) is logged and reported as `AlreadyExpired`.
    ///
    /// # Errors
    /// * `Token` - Token is structurally malformed (fatal)
    pub fn logout(&self, token: &str) -> Result<LogoutOutcome, AuthError> {
        match self.authenticator.verify_token(token, TokenWindow::Refresh) {
            Ok(signed) => {
                tracing::info!(
                    token_id = %signed.token_id(),
                    subject = %signed.subject(),
                    "User logged out"
                );
                Ok(LogoutOutcome::LoggedOut {
                    token_id: signed.token_id().to_string(),
                    subject: signed.subject().to_string(),
                })
            }
            Err(AuthenticationError::Unauthenticated) => {
                tracing::info!("Token already expired");
                Ok(LogoutOutcome::AlreadyExpired)
            }
            Err(e) => {
                tracing::error!(error = %e, "Logout failed");
                Err(e.into())
            }
        }
    }
}
