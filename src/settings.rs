use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};

use crate::constants::DEFAULT_RECENT_ITEMS;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

/// Which persistence substrate backs the document store.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackend,

    #[serde(default)]
    pub database_url: String,

    /// Per store call deadline, humantime syntax (`5s`, `750ms`).
    #[serde(default = "default_store_timeout")]
    pub store_timeout: String,

    #[serde(default = "default_store_max_retries")]
    pub store_max_retries: u32,

    #[serde(default = "default_store_retry_backoff")]
    pub store_retry_backoff: String,

    #[serde(default = "default_recent_items_limit")]
    pub recent_items_limit: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Wardrobe-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_store_backend() -> StoreBackend {
    StoreBackend::Memory
}
fn default_store_timeout() -> String {
    "5s".to_string()
}
fn default_store_max_retries() -> u32 {
    2
}
fn default_store_retry_backoff() -> String {
    "100ms".to_string()
}
fn default_recent_items_limit() -> usize {
    DEFAULT_RECENT_ITEMS
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true)
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        if config.database_url.trim().is_empty() {
            config.database_url = env::var("APP_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or_default();
        }

        config.validate()?;
        Ok(config)
    }

    /// Settings for tests and local tooling: in-memory store, short deadlines.
    pub fn for_testing() -> Self {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "Wardrobe-API-Test".to_string(),
            port: 0,
            host: default_host(),
            worker_count: 1,
            store_backend: StoreBackend::Memory,
            database_url: String::new(),
            store_timeout: "2s".to_string(),
            store_max_retries: 1,
            store_retry_backoff: "10ms".to_string(),
            recent_items_limit: DEFAULT_RECENT_ITEMS,
            cors_allowed_origins: default_cors_origins(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.store_backend == StoreBackend::Postgres && self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty with the postgres store".to_string());
        }
        if let Err(e) = self.store_timeout() {
            errors.push(e.to_string());
        }
        if let Err(e) = self.store_retry_backoff() {
            errors.push(e.to_string());
        }
        if self.recent_items_limit == 0 {
            errors.push("RECENT_ITEMS_LIMIT must be at least 1".to_string());
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn store_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("store_timeout", &self.store_timeout)
    }

    pub fn store_retry_backoff(&self) -> Result<Duration, ConfigError> {
        parse_duration("store_retry_backoff", &self.store_retry_backoff)
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn parse_duration(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(raw.trim())
        .map_err(|e| ConfigError::Message(format!("{key} is not a valid duration ({raw}): {e}")))?;

    if duration.is_zero() {
        return Err(ConfigError::Message(format!("{key} must be greater than zero")));
    }
    Ok(duration)
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{}", s)
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("store_backend", &self.store_backend)
            .field("database_url", &self.database_url.redact())
            .field("store_timeout", &self.store_timeout)
            .field("store_max_retries", &self.store_max_retries)
            .field("store_retry_backoff", &self.store_retry_backoff)
            .field("recent_items_limit", &self.recent_items_limit)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}
