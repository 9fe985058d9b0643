//! Server configuration.
//!
//! Layered with `figment`: built-in defaults, then an optional JSON file
//! (`$OLDRAO_CONFIG`, default `oldrao.json`), then `OLDRAO_*` environment
//! variables, e.g. `OLDRAO_PORT=8080`.

use crate::events::StreamSettings;
use figment::providers::{Env, Format, Json, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const ENV_PREFIX: &str = "OLDRAO_";
const CONFIG_PATH_VAR: &str = "OLDRAO_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "oldrao.json";
/// Ten years.
const MAX_SESSION_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] figment::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("invalid listen address {0}")]
    Address(String),
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Host to bind (default `"127.0.0.1"`).
    pub host: String,
    /// Port to bind (default `3000`).
    pub port: u16,
    /// Static files served for any unmatched path.
    pub public_dir: PathBuf,
    /// Seconds between keep-alive comments on event streams.
    pub heartbeat_interval_secs: u64,
    /// Lifetime of a login session.
    pub session_ttl_secs: u64,
    /// Seconds between sweeps that delete expired sessions.
    pub session_sweep_interval_secs: u64,
    /// Frames an event stream may fall behind before it is dropped.
    pub subscriber_buffer: usize,
    /// Request queue depth of each resource actor.
    pub actor_buffer: usize,
    /// When both are set, an admin account with these credentials is created at startup.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 3000,
            public_dir: PathBuf::from("public"),
            heartbeat_interval_secs: 25,
            session_ttl_secs: 24 * 60 * 60,
            session_sweep_interval_secs: 10 * 60,
            subscriber_buffer: 64,
            actor_buffer: 32,
            admin_email: None,
            admin_password: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("public_dir", &self.public_dir)
            .field("heartbeat_interval_secs", &self.heartbeat_interval_secs)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("session_sweep_interval_secs", &self.session_sweep_interval_secs)
            .field("subscriber_buffer", &self.subscriber_buffer)
            .field("actor_buffer", &self.actor_buffer)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    /// The provider stack, reading the JSON file at `path`.
    pub fn figment(path: impl Into<PathBuf>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Json::file(path.into()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    /// Loads and validates the configuration from the default locations.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_figment(Self::figment(path))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heartbeat_interval_secs == 0 {
            return Err(ConfigError::Invalid("heartbeat_interval_secs must be positive".into()));
        }
        if self.session_sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "session_sweep_interval_secs must be positive".into(),
            ));
        }
        if self.session_ttl_secs == 0 || self.session_ttl_secs > MAX_SESSION_TTL_SECS {
            return Err(ConfigError::Invalid(format!(
                "session_ttl_secs must be between 1 and {MAX_SESSION_TTL_SECS}"
            )));
        }
        if self.subscriber_buffer == 0 || self.actor_buffer == 0 {
            return Err(ConfigError::Invalid("buffer sizes must be positive".into()));
        }
        if self.admin_email.is_some() != self.admin_password.is_some() {
            return Err(ConfigError::Invalid(
                "admin_email and admin_password must be set together".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::Address(addr))
    }

    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings {
            heartbeat_interval: Duration::from_secs(self.heartbeat_interval_secs),
            buffer: self.subscriber_buffer,
        }
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        let secs = i64::try_from(self.session_ttl_secs.min(MAX_SESSION_TTL_SECS)).unwrap_or(i64::MAX);
        chrono::Duration::seconds(secs)
    }

    pub fn session_sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_secs)
    }

    /// Seed admin credentials, when configured.
    pub fn admin_credentials(&self) -> Option<(&str, &str)> {
        Some((self.admin_email.as_deref()?, self.admin_password.as_deref()?))
    }
}
