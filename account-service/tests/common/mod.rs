use std::sync::Arc;

use account_service::account::models::DEFAULT_ROLE_ID;
use account_service::account::service::AuthenticationService;
use account_service::inbound::http::router::create_router;
use account_service::repositories::InMemoryAccountRepository;
use account_service::repositories::InMemoryRoleRepository;
use auth::Authenticator;
use auth::ManualClock;
use auth::TokenLifetimes;
use chrono::TimeZone;
use chrono::Utc;

pub const JWT_SECRET: &[u8] =
    b"test-secret-key-for-hs512-signing-must-be-at-least-sixty-four-bytes-long";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub clock: Arc<ManualClock>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn with 60s access and 3600s refresh validity on in-memory stores.
    pub async fn spawn() -> Self {
        Self::spawn_with_roles(InMemoryRoleRepository::with_default_roles()).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_roles(roles: InMemoryRoleRepository) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ));
        let lifetimes = TokenLifetimes::from_millis(60_000, 3_600_000).unwrap();
        let authenticator = Arc::new(
            Authenticator::with_clock(JWT_SECRET, lifetimes, clock.clone())
                .expect("Failed to create authenticator"),
        );

        let auth_service = Arc::new(AuthenticationService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(roles),
            authenticator,
            DEFAULT_ROLE_ID,
        ));

        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            clock,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to POST a register request
    pub async fn register(&self, body: serde_json::Value) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, user_name: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&serde_json::json!({ "userName": user_name, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn introspect(&self, token: &str) -> bool {
        let response = self
            .post("/api/auth/introspect")
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["valid"]
            .as_bool()
            .expect("Missing valid flag")
    }

    pub async fn logout(&self, token: &str) -> reqwest::Response {
        self.post("/api/auth/logout")
            .json(&serde_json::json!({ "token": token }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Extract `data.token` from a register or login response.
pub async fn token_of(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["authenticated"], true);
    body["data"]["token"]
        .as_str()
        .expect("Missing token")
        .to_string()
}
