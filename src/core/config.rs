use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;
use std::time::Duration;

#[derive(Deserialize, Clone)]
pub struct AppConfig {
    pub application: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let config_dir = base_path.join("src/core/configurations");

        let app_environment: Environment = std::env::var("MOVIE_TICKETS_APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;

        let configurations = config::Config::builder()
            .add_source(config::File::from(config_dir.join("base")).required(true))
            .add_source(
                config::File::from(config_dir.join(app_environment.as_str())).required(true),
            )
            // MOVIE_TICKETS__DATABASE__URL=sqlite://tickets.db overrides database.url
            .add_source(
                config::Environment::with_prefix("MOVIE_TICKETS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configurations.try_deserialize()
    }
}

#[derive(Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
    #[serde(default = "default_busy_timeout_secs")]
    pub busy_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url.expose_secret().contains(":memory:")
    }

    pub fn connect(&self) -> Result<SqliteConnectOptions, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(self.url.expose_secret())?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs));

        Ok(options.log_statements(tracing::log::LevelFilter::Trace))
    }

    /// An in-memory database lives and dies with its connection, so it gets
    /// exactly one that is never recycled.
    pub fn pool_options(&self) -> SqlitePoolOptions {
        let options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs));

        if self.is_in_memory() {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            options.max_connections(self.max_connections)
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_busy_timeout_secs() -> u64 {
    5
}

#[derive(Deserialize, Clone, Debug)]
pub struct PlanSeed {
    pub name: String,
    pub price: f64,
    pub movie_limit: i64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CatalogConfig {
    pub plans: Vec<PlanSeed>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            plans: vec![
                PlanSeed {
                    name: "Standard".to_string(),
                    price: 9.99,
                    movie_limit: 10,
                },
                PlanSeed {
                    name: "Premium".to_string(),
                    price: 19.99,
                    movie_limit: 20,
                },
            ],
        }
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not supported environment. Use either `local` or `production` ",
                other
            )),
        }
    }
}
