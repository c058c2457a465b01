use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::introspect::TokenRequest;
use super::ApiError;
use super::ApiSuccess;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;
use crate::inbound::http::router::AppState;

/// Succeeds with an empty body for any well-formed token, expired or not.
pub async fn logout<AR, RR>(
    State(state): State<AppState<AR, RR>>,
    Json(body): Json<TokenRequest>,
) -> Result<ApiSuccess<()>, ApiError>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    state
        .auth_service
        .logout(&body.token)
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
