//! Process configuration from the environment.

use crate::error::ConfigError;
use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://127.0.0.1/crud-practice-1";
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3001";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    pub records_schema: String,
    pub records_table: String,
    /// Origins allowed cross-origin access. Requests without an `Origin` header are always served.
    pub cors_origins: Vec<String>,
    pub body_limit_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(AppConfig {
            host: parse_or("HOST", get("HOST"), IpAddr::from([0, 0, 0, 0]))?,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5)?,
            records_schema: identifier("RECORDS_SCHEMA", get("RECORDS_SCHEMA"), "public")?,
            records_table: identifier("RECORDS_TABLE", get("RECORDS_TABLE"), "testtable1")?,
            cors_origins,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"), 100 * 1024)?,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: format!("{:?}: {}", s, e),
        }),
    }
}

/// Table and schema names end up quoted in SQL; still keep them to plain identifiers.
fn identifier(var: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    let name = raw.unwrap_or_else(|| default.to_string());
    let mut chars = name.chars();
    let valid_start = chars.next().map(|c| c.is_ascii_alphabetic() || c == '_').unwrap_or(false);
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') && name.len() <= 63 {
        Ok(name)
    } else {
        Err(ConfigError::Invalid {
            var,
            reason: format!("{:?} is not a valid identifier", name),
        })
    }
}
