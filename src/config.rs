use std::{env, fmt::Display, str::FromStr};

use log::info;
use thiserror::Error;

#[derive(Error, Debug)]
#[error("Invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Base URL of the booking API, including its `/api` prefix.
    pub api_url: String,
    /// Allowed CORS origin; any origin when unset.
    pub frontend_origin: Option<String>,
    /// Shared HS256 secret for verifying tokens locally.
    pub jwt_secret: Option<String>,
    pub mock_fallback: bool,
    pub page_size: usize,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            api_url: "http://localhost:8000/api".to_string(),
            frontend_origin: None,
            jwt_secret: None,
            mock_fallback: true,
            page_size: 9,
            request_timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = Config::default();
        Ok(Self {
            host: try_load("HOST", defaults.host)?,
            port: try_load("PORT", defaults.port)?,
            api_url: try_load("API_URL", defaults.api_url)?,
            frontend_origin: optional("FRONTEND_ORIGIN"),
            jwt_secret: optional("JWT_SECRET"),
            mock_fallback: try_load("MOCK_FALLBACK", defaults.mock_fallback)?,
            page_size: try_load("PAGE_SIZE", defaults.page_size)?,
            request_timeout_secs: try_load("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
        })
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match optional(key) {
        Some(raw) => parse(key, &raw),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_parse_and_bad_ones_name_the_key() {
        assert_eq!(parse::<u16>("PORT", " 9090 ").unwrap(), 9090);
        assert!(parse::<bool>("MOCK_FALLBACK", "true").unwrap());

        let err = parse::<u16>("PORT", "eighty").unwrap_err();
        assert_eq!(err.key, "PORT");
        assert!(err.to_string().starts_with("Invalid PORT value \"eighty\""));
    }

    #[test]
    fn defaults_point_at_a_local_api() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert!(config.mock_fallback);
        assert_eq!(config.page_size, 9);
    }
}
