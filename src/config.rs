use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Which directory implementation the binary talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryBackend {
    /// The real remote directory over HTTP.
    Remote,
    /// Process-local directory, for demos and tests.
    Memory,
}

impl DirectoryBackend {
    fn parse(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "remote" | "http" => Ok(Self::Remote),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err(anyhow::anyhow!(
                "DIRECTORY_BACKEND must be one of: remote, memory"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address of this facade.
    pub host: String,
    pub port: u16,

    pub directory_backend: DirectoryBackend,

    /// Base URL of the remote directory.
    pub directory_base_url: String,

    /// Connect timeout for directory calls.
    pub connect_timeout: Duration,

    /// End-to-end response timeout for directory calls.
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let host = env::var("APP_HOST").unwrap_or(defaults.host);
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| defaults.port.to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let directory_backend = match env::var("DIRECTORY_BACKEND") {
            Ok(raw) => DirectoryBackend::parse(&raw)?,
            Err(_) => defaults.directory_backend,
        };

        let directory_base_url =
            env::var("DIRECTORY_BASE_URL").unwrap_or(defaults.directory_base_url);

        let connect_timeout = timeout_from_env(
            "DIRECTORY_CONNECT_TIMEOUT_MS",
            defaults.connect_timeout,
        )?;
        let request_timeout = timeout_from_env(
            "DIRECTORY_REQUEST_TIMEOUT_MS",
            defaults.request_timeout,
        )?;

        Ok(Self {
            host,
            port,
            directory_backend,
            directory_base_url,
            connect_timeout,
            request_timeout,
        })
    }

    /// Configuration pointing at a directory under the given base URL,
    /// with default timeouts.
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            directory_base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            directory_backend: DirectoryBackend::Remote,
            directory_base_url: "http://localhost:8112".to_string(),
            // The directory is expected to answer within 5 seconds.
            connect_timeout: Duration::from_millis(5000),
            request_timeout: Duration::from_millis(5000),
        }
    }
}

fn timeout_from_env(var: &str, default: Duration) -> Result<Duration> {
    match env::var(var) {
        Ok(raw) => {
            let millis = raw
                .parse::<u64>()
                .with_context(|| format!("{var} must be a number of milliseconds"))?;
            Ok(Duration::from_millis(millis))
        }
        Err(_) => Ok(default),
    }
}
