use std::time::Duration;

use crate::database::client::DbConfig;
use crate::middleware::error::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub db_timeout: Duration,
    pub auth_service_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, `from_env` passes the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let db_namespace = lookup("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = lookup("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = lookup("DB_PASSWORD");
        let db_username = lookup("DB_USERNAME");
        let db_url = required(&lookup, "DB_URL")?;
        let db_timeout_secs: u64 = parse_or(&lookup, "DB_TIMEOUT_SECS", 30)?;
        let auth_service_url = required(&lookup, "AUTH_SERVICE_URL")?;
        let port: u16 = parse_or(&lookup, "PORT", 8080)?;

        Ok(Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            db_timeout: Duration::from_secs(db_timeout_secs),
            auth_service_url,
            port,
        })
    }

    pub fn db_config(&self) -> DbConfig<'_> {
        DbConfig {
            url: &self.db_url,
            database: &self.db_database,
            namespace: &self.db_namespace,
            username: self.db_username.as_deref(),
            password: self.db_password.as_deref(),
            timeout: self.db_timeout,
        }
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> AppResult<String> {
    lookup(key).ok_or(AppError::Config {
        reason: format!("Missing {key} in env"),
    })
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> AppResult<T> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|_| AppError::Config {
            reason: format!("{key} must be number"),
        }),
    }
}
