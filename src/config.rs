// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and never
//! mutated while serving. The signing secret and downstream base URLs are
//! process-wide, read-only values.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `JWT_SECRET` | HS256 signing key for session tokens | Required |
//! | `JWT_TTL_SECS` | Session token lifetime in seconds | `3600` |
//! | `PRODUCT_SERVICE_URL` | Base URL of the product service | Required |
//! | `WALLET_SERVICE_URL` | Base URL of the wallet service | Required |
//! | `PROXY_TIMEOUT_SECS` | Timeout for downstream calls in seconds | `5` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use url::Url;

/// Environment variable name for the server bind address.
pub const HOST_ENV: &str = "HOST";

/// Environment variable name for the server bind port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the HS256 signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Environment variable name for the token lifetime in seconds.
pub const JWT_TTL_ENV: &str = "JWT_TTL_SECS";

/// Environment variable name for the product service base URL.
pub const PRODUCT_SERVICE_URL_ENV: &str = "PRODUCT_SERVICE_URL";

/// Environment variable name for the wallet service base URL.
pub const WALLET_SERVICE_URL_ENV: &str = "WALLET_SERVICE_URL";

/// Environment variable name for the downstream call timeout in seconds.
pub const PROXY_TIMEOUT_ENV: &str = "PROXY_TIMEOUT_SECS";

/// Environment variable name for the logging format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_JWT_TTL_SECS: u64 = 3600;
const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 5;

/// Configuration error raised during startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidVar(&'static str, String),
}

/// Gateway configuration, resolved once at process start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in seconds.
    pub jwt_ttl_secs: u64,
    /// Base URL of the product service.
    pub product_service_url: String,
    /// Base URL of the wallet service.
    pub wallet_service_url: String,
    /// Timeout applied to every downstream call.
    pub proxy_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = get(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get(PORT_ENV) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar(PORT_ENV, raw))?,
            None => DEFAULT_PORT,
        };

        let jwt_secret = get(JWT_SECRET_ENV).ok_or(ConfigError::MissingVar(JWT_SECRET_ENV))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidVar(JWT_SECRET_ENV, "empty".to_string()));
        }

        let jwt_ttl_secs = parse_secs(&get, JWT_TTL_ENV, DEFAULT_JWT_TTL_SECS)?;
        let proxy_timeout_secs = parse_secs(&get, PROXY_TIMEOUT_ENV, DEFAULT_PROXY_TIMEOUT_SECS)?;

        let product_service_url = required_base_url(&get, PRODUCT_SERVICE_URL_ENV)?;
        let wallet_service_url = required_base_url(&get, WALLET_SERVICE_URL_ENV)?;

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_ttl_secs,
            product_service_url,
            wallet_service_url,
            proxy_timeout_secs,
        })
    }
}

fn parse_secs<F>(get: &F, name: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidVar(name, raw.clone()))?;
            if secs == 0 {
                return Err(ConfigError::InvalidVar(name, raw));
            }
            Ok(secs)
        }
        None => Ok(default),
    }
}

/// Fetch a required base URL and validate it parses as an absolute URL.
/// Trailing slashes are stripped so paths can be appended verbatim.
fn required_base_url<F>(get: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = get(name).ok_or(ConfigError::MissingVar(name))?;
    Url::parse(&raw).map_err(|e| ConfigError::InvalidVar(name, format!("{raw}: {e}")))?;
    Ok(raw.trim_end_matches('/').to_string())
}
