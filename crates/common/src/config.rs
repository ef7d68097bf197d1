//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Front-end origins allowed to make credentialed cross-origin requests
/// when `CORS_ALLOWED_ORIGINS` is not set.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "https://steady-strudel-46e00d.netlify.app",
];

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_DATABASE_HOST: &str = "localhost:5432";
const DEFAULT_DATABASE_NAME: &str = "artifacts";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment environment; drives cookie security attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Development,
    Production,
}

impl RuntimeMode {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            RuntimeMode::Production
        } else {
            RuntimeMode::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeMode::Production)
    }
}

/// Optional route groups. One service covers both the guarded and the
/// open deployment by toggling these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Features {
    /// `/session` routes plus the guard on `/artifacts/mine`
    pub session_auth: bool,
    /// `/artifacts/featured` and `/artifacts/search`
    pub discovery: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            session_auth: true,
            discovery: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Postgres connection URL
    pub database_url: String,
    pub database_max_connections: u32,

    /// Token signing secret; only present when session auth is enabled
    pub jwt_secret: Option<String>,

    /// Runtime configuration
    pub port: u16,
    pub mode: RuntimeMode,
    pub allowed_origins: Vec<String>,
    pub features: Features,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Parse configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = lookup("DATABASE_USER").ok_or(ConfigError::Missing("DATABASE_USER"))?;
                let pass = lookup("DATABASE_PASS").ok_or(ConfigError::Missing("DATABASE_PASS"))?;
                let host =
                    lookup("DATABASE_HOST").unwrap_or_else(|| DEFAULT_DATABASE_HOST.to_string());
                let name =
                    lookup("DATABASE_NAME").unwrap_or_else(|| DEFAULT_DATABASE_NAME.to_string());
                format!(
                    "postgres://{}:{}@{host}/{name}",
                    urlencoding::encode(&user),
                    urlencoding::encode(&pass)
                )
            }
        };

        let database_max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;

        let features = Features {
            session_auth: parse_bool_or(&lookup, "FEATURE_SESSION_AUTH", true)?,
            discovery: parse_bool_or(&lookup, "FEATURE_DISCOVERY", true)?,
        };

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.is_empty()) {
            Some(secret) => Some(secret),
            None if features.session_auth => return Err(ConfigError::Missing("JWT_SECRET")),
            None => None,
        };

        let mode = lookup("APP_ENV")
            .or_else(|| lookup("NODE_ENV"))
            .map(|v| RuntimeMode::parse(&v))
            .unwrap_or_default();

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            jwt_secret,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            mode,
            allowed_origins,
            features,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, name: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        },
        None => Ok(default),
    }
}
