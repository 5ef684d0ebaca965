//! Process configuration, read from the environment at startup.

use std::{env, net::SocketAddr, time::Duration};

use thiserror::Error;

use crate::store::StoreSettings;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which `TodoStore` the binary runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Mongo,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_kind: StoreKind,
    pub store: StoreSettings,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source. Unset variables
    /// fall back to their defaults; set but unparseable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_kind = match lookup("TODO_STORE").as_deref() {
            None | Some("mongo") => StoreKind::Mongo,
            Some("memory") => StoreKind::Memory,
            Some(other) => return Err(invalid("TODO_STORE", other, "expected mongo or memory")),
        };
        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid("LOG_FORMAT", other, "expected text or json")),
        };

        Ok(Config {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 9000)?,
            store_kind,
            store: StoreSettings {
                uri: lookup("MONGODB_URI")
                    .unwrap_or_else(|| "mongodb://localhost:27017".to_string()),
                database: lookup("TODO_DB").unwrap_or_else(|| "todo_db".to_string()),
                collection: lookup("TODO_COLLECTION").unwrap_or_else(|| "todo".to_string()),
                connect_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "STORE_CONNECT_TIMEOUT_SECS",
                    10,
                )?),
            },
            request_timeout: Duration::from_secs(parse_or(&lookup, "HTTP_TIMEOUT_SECS", 60)?),
            log_format,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|e: std::net::AddrParseError| invalid("HOST", &self.host, &e.to_string()))
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| invalid(var, &raw, &e.to_string())),
    }
}

fn invalid(var: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
