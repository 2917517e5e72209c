use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime configuration, read from the environment (and `.env` if present).
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let db_path: PathBuf = std::env::var("CORKBOARD_DB_PATH")
            .unwrap_or_else(|_| "messages.db".into())
            .into();
        let host = std::env::var("CORKBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("CORKBOARD_PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .context("CORKBOARD_PORT must be a port number")?;
        let timeout_secs: u64 = std::env::var("CORKBOARD_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .context("CORKBOARD_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            db_path,
            host,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
