use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::AuthenticationResponseData;
use crate::account::models::LoginCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;
use crate::inbound::http::router::AppState;

pub async fn login<AR, RR>(
    State(state): State<AppState<AR, RR>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<AuthenticationResponseData>, ApiError>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    state
        .auth_service
        .login(LoginCommand::new(body.user_name, body.password))
        .await
        .map_err(ApiError::from)
        .map(|response| ApiSuccess::new(StatusCode::OK, response.into()))
}

/// `userName` may carry a username, an email address or a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    user_name: String,
    password: String,
}
