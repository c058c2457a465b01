use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;
use crate::inbound::http::router::AppState;

pub async fn introspect<AR, RR>(
    State(state): State<AppState<AR, RR>>,
    Json(body): Json<TokenRequest>,
) -> ApiSuccess<IntrospectResponseData>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    let response = state.auth_service.introspect(&body.token);
    ApiSuccess::new(
        StatusCode::OK,
        IntrospectResponseData {
            valid: response.valid,
        },
    )
}

/// Request body carrying a bare token, shared with logout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntrospectResponseData {
    pub valid: bool,
}
