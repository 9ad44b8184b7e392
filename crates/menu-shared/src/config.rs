//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{
    DEFAULT_KEY_PREFIX, DEFAULT_NONCE_LIFETIME_SECS, DEFAULT_ROUTE_TICK_SECS,
    DEFAULT_STATS_TIMEOUT_MS,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub app: AppSettings,
    #[validate(nested)]
    pub security: SecuritySettings,
    pub store: StoreSettings,
    #[validate(nested)]
    pub redis: RedisSettings,
    #[validate(nested)]
    pub host: HostSettings,
    #[serde(default)]
    #[validate(nested)]
    pub menu: MenuSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppSettings {
    pub env: String,
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct SecuritySettings {
    #[validate(length(min = 16, message = "JWT secret too short"))]
    pub jwt_secret: String,
    #[validate(length(min = 16, message = "Nonce secret too short"))]
    pub nonce_secret: String,
    #[validate(range(min = 60, message = "Nonce lifetime must be at least one minute"))]
    pub nonce_lifetime_secs: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub key_prefix: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RedisSettings {
    pub url: String,
    #[validate(range(min = 1))]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct HostSettings {
    /// Base URL of the store platform's customer statistics API.
    pub stats_base_url: Option<String>,
    #[validate(range(min = 1))]
    pub stats_timeout_ms: u64,
    #[validate(range(min = 1, message = "Route tick interval must be positive"))]
    pub route_tick_secs: u64,
}

/// A role known to the deployment, as shown in the builder UI.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct RoleSetting {
    #[validate(length(min = 1))]
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct MenuSettings {
    #[serde(default = "default_roles")]
    #[validate(nested)]
    pub roles: Vec<RoleSetting>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self { roles: default_roles() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    /// Directory for rolling JSON log files; stdout only when unset.
    pub directory: Option<String>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_file_prefix() -> String {
    "menu-server.log".into()
}

fn default_roles() -> Vec<RoleSetting> {
    [
        ("administrator", "Administrator"),
        ("editor", "Editor"),
        ("author", "Author"),
        ("contributor", "Contributor"),
        ("subscriber", "Subscriber"),
        ("customer", "Customer"),
        ("shop_manager", "Shop manager"),
    ]
    .into_iter()
    .map(|(slug, name)| RoleSetting {
        slug: slug.into(),
        name: name.into(),
    })
    .collect()
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("security.jwt_secret", "development-jwt-secret-change-me")?
            .set_default("security.nonce_secret", "development-nonce-secret-change-me")?
            .set_default("security.nonce_lifetime_secs", DEFAULT_NONCE_LIFETIME_SECS)?
            .set_default("store.backend", "memory")?
            .set_default("store.key_prefix", DEFAULT_KEY_PREFIX)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("redis.max_connections", 8)?
            .set_default("host.stats_timeout_ms", DEFAULT_STATS_TIMEOUT_MS)?
            .set_default("host.route_tick_secs", DEFAULT_ROUTE_TICK_SECS)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
