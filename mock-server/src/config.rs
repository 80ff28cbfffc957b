//! Environment configuration for the mock backend binary.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SUMMARY_MAX_WORDS: usize = 8;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}={value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub summary_max_words: usize,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            summary_max_words: DEFAULT_SUMMARY_MAX_WORDS,
            log_json: false,
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `SUMMARY_MAX_WORDS` and `LOG_JSON`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| invalid("PORT", &raw, e))?,
            None => defaults.port,
        };
        let summary_max_words = match lookup("SUMMARY_MAX_WORDS") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) => return Err(invalid("SUMMARY_MAX_WORDS", &raw, "must be at least 1")),
                Ok(n) => n,
                Err(e) => return Err(invalid("SUMMARY_MAX_WORDS", &raw, e)),
            },
            None => defaults.summary_max_words,
        };
        let log_json = match lookup("LOG_JSON") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| invalid("LOG_JSON", &raw, "expected true/false"))?,
            None => defaults.log_json,
        };
        Ok(Self {
            host,
            port,
            summary_max_words,
            log_json,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|e| invalid("HOST", &self.host, e))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

fn invalid(name: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
