use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::profile::DEFAULT_PHOTO_BUCKET;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub storage: StorageConfig,
    pub session_file: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub max_photo_size: usize,
    pub db_timeout: Duration,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub url: String,
    pub api_key: String,
    pub bucket: String,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let storage = StorageConfig {
            url: env_required("SALON_STORAGE_URL")?,
            api_key: env_required("SALON_STORAGE_KEY")?,
            bucket: env_or("SALON_PHOTO_BUCKET", DEFAULT_PHOTO_BUCKET),
            timeout: Duration::from_secs(
                env_or("SALON_STORAGE_TIMEOUT_SECS", "30")
                    .parse()
                    .map_err(|e| format!("Invalid SALON_STORAGE_TIMEOUT_SECS: {e}"))?,
            ),
        };

        let session_file = PathBuf::from(env_or("SALON_SESSION_FILE", ".salon-session.json"));

        let host: IpAddr = env_or("SALON_HOST", "127.0.0.1")
            .parse()
            .map_err(|e| format!("Invalid SALON_HOST: {e}"))?;

        let port: u16 = env_or("SALON_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid SALON_PORT: {e}"))?;

        let max_photo_size: usize = env_or("SALON_MAX_PHOTO_SIZE", "5242880")
            .parse()
            .map_err(|e| format!("Invalid SALON_MAX_PHOTO_SIZE: {e}"))?;

        let db_timeout = Duration::from_secs(
            env_or("SALON_DB_TIMEOUT_SECS", "10")
                .parse()
                .map_err(|e| format!("Invalid SALON_DB_TIMEOUT_SECS: {e}"))?,
        );

        let log_level = env_or("SALON_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            storage,
            session_file,
            host,
            port,
            max_photo_size,
            db_timeout,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
