use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiErrorData;
use super::ApiSuccess;
use super::AuthenticationResponseData;
use crate::account::errors::EmailError;
use crate::account::errors::PhoneError;
use crate::account::errors::UsernameError;
use crate::account::models::EmailAddress;
use crate::account::models::PhoneNumber;
use crate::account::models::RegisterCommand;
use crate::account::models::UserProfile;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;
use crate::inbound::http::router::AppState;

pub async fn register<AR, RR>(
    State(state): State<AppState<AR, RR>>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AuthenticationResponseData>, ApiError>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|response| ApiSuccess::new(StatusCode::CREATED, response.into()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    user_name: String,
    email: String,
    phone: String,
    password: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone: {0}")]
    Phone(#[from] PhoneError),
}

impl ParseRegisterRequestError {
    fn code(&self) -> &'static str {
        match self {
            ParseRegisterRequestError::Username(_) => "INVALID_USERNAME",
            ParseRegisterRequestError::Email(_) => "INVALID_EMAIL",
            ParseRegisterRequestError::Phone(_) => "INVALID_PHONE",
        }
    }
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = Username::new(self.user_name)?;
        let email = EmailAddress::new(self.email)?;
        let phone = PhoneNumber::new(self.phone)?;
        let profile = UserProfile {
            full_name: self.full_name,
            address: self.address,
        };
        Ok(RegisterCommand::new(username, email, phone, self.password).with_profile(profile))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(ApiErrorData {
            code: err.code().to_string(),
            message: err.to_string(),
        })
    }
}
