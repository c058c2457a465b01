use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::account::errors::AuthError;
use crate::account::models::AuthenticationResponse;

pub mod introspect;
pub mod login;
pub mod logout;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// HTTP-facing error; every variant carries the symbolic code and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(ApiErrorData),
    UnprocessableEntity(ApiErrorData),
    Conflict(ApiErrorData),
    Unauthorized(ApiErrorData),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, data) = match self {
            ApiError::InternalServerError(data) => (StatusCode::INTERNAL_SERVER_ERROR, data),
            ApiError::UnprocessableEntity(data) => (StatusCode::UNPROCESSABLE_ENTITY, data),
            ApiError::Conflict(data) => (StatusCode::CONFLICT, data),
            ApiError::Unauthorized(data) => (StatusCode::UNAUTHORIZED, data),
        };

        (status, Json(ApiResponseBody::new(status, data))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailTaken | AuthError::PhoneTaken | AuthError::UserExisted => {
                ApiError::Conflict(ApiErrorData::from(&err))
            }
            AuthError::UnableToLogin
            | AuthError::PasswordNotCorrect
            | AuthError::Unauthenticated => ApiError::Unauthorized(ApiErrorData::from(&err)),
            AuthError::InvalidUsername(_)
            | AuthError::InvalidEmail(_)
            | AuthError::InvalidPhone(_) => ApiError::UnprocessableEntity(ApiErrorData::from(&err)),
            AuthError::RoleNotFound(_)
            | AuthError::Token(_)
            | AuthError::Password(_)
            | AuthError::DatabaseError(_) => {
                tracing::error!(error = %err, "Request failed with an internal error");
                // Infrastructure details stay in the logs
                ApiError::InternalServerError(ApiErrorData {
                    code: err.code().to_string(),
                    message: "Internal server error".to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
}

impl From<&AuthError> for ApiErrorData {
    fn from(err: &AuthError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Response body shared by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationResponseData {
    pub token: String,
    pub authenticated: bool,
}

impl From<AuthenticationResponse> for AuthenticationResponseData {
    fn from(response: AuthenticationResponse) -> Self {
        Self {
            token: response.token,
            authenticated: response.authenticated,
        }
    }
}
