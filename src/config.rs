use anyhow::Context;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;

use crate::model::UserId;
use crate::session::{SessionMode, DEFAULT_MAX_SESSIONS};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    /// Insert demo users and items on startup when the users table is empty
    pub seed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served for every path no route claims
    pub static_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub connection_string: Option<String>,
    /// Keep users and items in process memory instead of PostgreSQL
    pub in_memory: bool,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub name: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: SessionMode,
    /// Selection a client starts with before it picks a user
    pub initial_user_id: Option<UserId>,
    /// Most client selections kept in memory before the oldest is dropped
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            static_dir: "public".to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connection_string: None,
            in_memory: false,
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: None,
            name: "permalist".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: SessionMode::PerClient,
            initial_user_id: Some(1),
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// Plain `DB_*` variables and the database keys they override
const LEGACY_DATABASE_VARS: [(&str, &str); 5] = [
    ("DB_USER", "database.user"),
    ("DB_HOST", "database.host"),
    ("DB_NAME", "database.name"),
    ("DB_PASS", "database.password"),
    ("DB_PORT", "database.port"),
];

impl AppConfig {
    /// Load configuration from defaults, an optional `config` file, and the environment
    pub fn load() -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Add default configuration
        config = config.add_source(config::Config::try_from(&AppConfig::default())?);

        // Add config file if it exists
        config = config.add_source(config::File::with_name("config").required(false));

        // Environment variables like TODO_SERVER__PORT=8080
        config = config.add_source(
            config::Environment::with_prefix("TODO")
                .prefix_separator("_")
                .separator("__"),
        );

        for (var, key) in LEGACY_DATABASE_VARS {
            let value = std::env::var(var).ok().filter(|value| !value.is_empty());
            config = config.set_override_option(key, value)?;
        }

        let config = config.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// Connection options from an explicit connection string, `DATABASE_URL`,
    /// or the individual database settings, in that order
    pub fn connect_options(&self) -> anyhow::Result<PgConnectOptions> {
        let url = self
            .database
            .connection_string
            .clone()
            .or_else(|| std::env::var("DATABASE_URL").ok());

        if let Some(url) = url {
            return url
                .parse::<PgConnectOptions>()
                .context("Invalid database connection string");
        }

        let db = &self.database;
        let mut options = PgConnectOptions::new()
            .host(&db.host)
            .port(db.port)
            .username(&db.user)
            .database(&db.name);
        if let Some(password) = &db.password {
            options = options.password(password);
        }
        Ok(options)
    }

    /// Get the server bind address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
