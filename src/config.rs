use derive_more::Display;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Display)]
pub enum ConfigError {
    #[display(fmt = "{} must be set", _0)]
    Missing(&'static str),
    #[display(fmt = "{} has an invalid value: {}", _0, _1)]
    Invalid(&'static str, String),
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub run_migrations: bool,

    // Face encoding service
    pub face_service_url: String,
    pub face_service_timeout_secs: u64,
    pub match_threshold: f64,

    // 0 disables rate limiting
    pub rate_limit_per_min: u32,
    // Request bodies carry base64 camera frames
    pub json_limit_bytes: usize,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        Ok(Self {
            server_addr: required("SERVER_ADDR")?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            run_migrations: parse_or("RUN_MIGRATIONS", true)?,

            face_service_url: required("FACE_SERVICE_URL")?,
            face_service_timeout_secs: parse_or("FACE_SERVICE_TIMEOUT_SECS", 10)?,
            match_threshold: parse_or("MATCH_THRESHOLD", 0.45)?,

            rate_limit_per_min: parse_or("RATE_LIMIT_PER_MIN", 120)?,
            json_limit_bytes: parse_or("JSON_LIMIT_BYTES", 10 * 1024 * 1024)?,

            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
        })
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(key, raw)),
        Err(_) => Ok(default),
    }
}
