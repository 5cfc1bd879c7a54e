use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::service::retry::RetryPolicy;

/// Fixed greeting returned by the counting endpoint.
pub const GREETING: &str = "Hi from backend!";

/// Environment keys read into [`Config`]. `Env::raw` lowercases them.
const ENV_KEYS: &[&str] = &[
    "database_url",
    "listen_addr",
    "loglevel",
    "init_max_attempts",
    "init_retry_delay_secs",
    "db_max_connections",
    "db_acquire_timeout_secs",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    pub init_max_attempts: u32,
    pub init_retry_delay_secs: u64,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            init_max_attempts: 5,
            init_retry_delay_secs: 5,
            db_max_connections: 5,
            db_acquire_timeout_secs: 5,
        }
    }
}

impl Config {
    /// Build the configuration from defaults overlaid with process env.
    pub fn from_env() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::raw().only(ENV_KEYS))
            .extract()
    }

    /// Like [`Self::from_env`], but falls back to defaults. The extraction
    /// error is handed back so it can be logged once tracing is installed.
    pub fn load() -> (Self, Option<figment::Error>) {
        match Self::from_env() {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn init_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.init_max_attempts,
            Duration::from_secs(self.init_retry_delay_secs),
        )
    }

    pub fn db_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.db_acquire_timeout_secs)
    }

    /// `database_url` with any password replaced, for logging.
    pub fn redacted_database_url(&self) -> String {
        redact_url(&self.database_url)
    }
}

fn redact_url(raw: &str) -> String {
    if raw.is_empty() {
        return "<unset>".to_string();
    }
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("****"));
            }
            parsed.to_string()
        }
        Err(_) => "<invalid>".to_string(),
    }
}
