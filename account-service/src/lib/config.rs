use std::env;

use auth::TokenCodec;
use auth::TokenLifetimes;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::account::models::RoleId;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Unset runs the service on in-memory stores.
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_validity_millis: u64,
    pub refresh_validity_millis: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default = "default_role_id")]
    pub default_role_id: i32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            default_role_id: default_role_id(),
        }
    }
}

fn default_role_id() -> i32 {
    4
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the token layer cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret_len = self.jwt.secret.len();
        if secret_len < TokenCodec::MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes, got {}",
                TokenCodec::MIN_SECRET_LEN,
                secret_len
            )));
        }

        self.token_lifetimes()?;
        Ok(())
    }

    pub fn token_lifetimes(&self) -> Result<TokenLifetimes, ConfigError> {
        TokenLifetimes::from_millis(
            self.jwt.access_validity_millis,
            self.jwt.refresh_validity_millis,
        )
        .map_err(|e| ConfigError::Message(e.to_string()))
    }

    pub fn default_role_id(&self) -> RoleId {
        RoleId(self.auth.default_role_id)
    }
}
