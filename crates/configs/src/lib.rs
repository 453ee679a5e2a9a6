//! # configs
//!
//! Layered runtime settings for the blog server and the seed tool.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. `config/local.toml` (optional, not committed)
//! 4. `BLOG__<SECTION>__<KEY>` environment variables, after `.env` is loaded
//!
//! Secrets are held as [`SecretString`] so they never show up in `Debug`
//! output or logs.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

pub const ENV_PREFIX: &str = "BLOG";
pub const ENV_SEPARATOR: &str = "__";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("missing required setting `{0}`")]
    Missing(&'static str),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub auth: AuthSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<SecretString>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordSchemeKind {
    Bcrypt,
    Argon2,
}

#[derive(Debug, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: Option<SecretString>,
    pub token_ttl_secs: i64,
    pub password_scheme: PasswordSchemeKind,
    pub bcrypt_cost: u32,
}

impl AuthSettings {
    /// The signing secret. Present after [`Settings::load`] succeeds.
    pub fn jwt_secret(&self) -> Result<&str, ConfigError> {
        self.jwt_secret
            .as_ref()
            .map(|s| s.expose_secret())
            .ok_or(ConfigError::Missing("auth.jwt_secret"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Settings {
    /// Loads `.env`, the config files and the environment, then validates.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR));
        Self::load_from(builder)
    }

    /// Applies the built-in defaults beneath `builder`'s sources and
    /// validates the result.
    pub fn load_from(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = with_defaults(builder)?.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let secret = self.auth.jwt_secret()?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Missing("auth.jwt_secret"));
        }
        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "auth.token_ttl_secs",
                reason: "must be positive".into(),
            });
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "auth.bcrypt_cost",
                reason: format!("{} is outside 4..=31", self.auth.bcrypt_cost),
            });
        }
        if self.storage.backend == StorageBackend::Postgres && self.database.url.is_none() {
            return Err(ConfigError::Missing("database.url"));
        }
        Ok(())
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("server.body_limit_bytes", 10 * 1024 * 1024)?
        .set_default("database.max_connections", 10)?
        .set_default("database.run_migrations", true)?
        .set_default("storage.backend", "postgres")?
        .set_default("auth.token_ttl_secs", 3600)?
        .set_default("auth.password_scheme", "bcrypt")?
        .set_default("auth.bcrypt_cost", 10)?
        .set_default("log.level", "info")?
        .set_default("log.format", "pretty")
}
