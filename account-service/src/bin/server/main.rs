use std::sync::Arc;

use account_service::account::ports::AccountRepository;
use account_service::account::ports::RoleRepository;
use account_service::account::service::AuthenticationService;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::repositories::InMemoryAccountRepository;
use account_service::repositories::InMemoryRoleRepository;
use account_service::repositories::PostgresAccountRepository;
use account_service::repositories::PostgresRoleRepository;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let lifetimes = config.token_lifetimes()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_validity_ms = config.jwt.access_validity_millis,
        refresh_validity_ms = config.jwt.refresh_validity_millis,
        default_role_id = config.auth.default_role_id,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes(), lifetimes)?);

    match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            serve(
                &config,
                Arc::new(PostgresAccountRepository::new(pg_pool.clone())),
                Arc::new(PostgresRoleRepository::new(pg_pool)),
                authenticator,
            )
            .await
        }
        None => {
            tracing::warn!("No database configured, accounts are kept in memory");
            serve(
                &config,
                Arc::new(InMemoryAccountRepository::new()),
                Arc::new(InMemoryRoleRepository::with_default_roles()),
                authenticator,
            )
            .await
        }
    }
}

async fn serve<AR, RR>(
    config: &Config,
    accounts: Arc<AR>,
    roles: Arc<RR>,
    authenticator: Arc<Authenticator>,
) -> Result<(), anyhow::Error>
where
    AR: AccountRepository,
    RR: RoleRepository,
{
    let auth_service = Arc::new(AuthenticationService::new(
        accounts,
        roles,
        authenticator,
        config.default_role_id(),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;
    tracing::info!("Server exited successfully");

    Ok(())
}
