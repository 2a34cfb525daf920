use serde::{Deserialize, Serialize};

/// Server configuration, read from the environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// PostgreSQL URL. Without it stocks are kept in memory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Apply embedded migrations on startup
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: None,
            pool_size: default_pool_size(),
            run_migrations: true,
        }
    }
}

impl AppConfig {
    /// Build the configuration from `BIND_ADDR`, `DATABASE_URL`,
    /// `DB_POOL_MAX_SIZE` and `RUN_MIGRATIONS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(default_bind_addr),
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            pool_size: lookup("DB_POOL_MAX_SIZE")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_pool_size),
            run_migrations: lookup("RUN_MIGRATIONS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_pool_size() -> u32 {
    10
}

fn default_true() -> bool {
    true
}
