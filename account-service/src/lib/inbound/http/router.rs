use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::introspect::introspect;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use crate::account::ports::AccountRepository;
use crate::account::ports::RoleRepository;
use crate::account::service::AuthenticationService;

pub struct AppState<AR, RR>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    pub auth_service: Arc<AuthenticationService<AR, RR>>,
}

// Derived Clone would demand AR: Clone and RR: Clone
impl<AR, RR> Clone for AppState<AR, RR>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
        }
    }
}

pub fn create_router<AR, RR>(auth_service: Arc<AuthenticationService<AR, RR>>) -> Router
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    let state = AppState { auth_service };

    let auth_routes = Router::new()
        .route("/api/auth/register", post(register::<AR, RR>))
        .route("/api/auth/login", post(login::<AR, RR>))
        .route("/api/auth/introspect", post(introspect::<AR, RR>))
        .route("/api/auth/logout", post(logout::<AR, RR>));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
