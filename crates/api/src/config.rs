use receipts_cloud::ImageBackend;
use receipts_core::config::{env_or, env_parse, ConfigError};
use receipts_core::images::DEFAULT_MAX_IMAGE_BYTES;
use receipts_db::DataBackend;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Largest accepted image upload in bytes (default: 5 MiB).
    pub max_image_bytes: usize,
    /// Receipt store selection.
    pub data_backend: DataBackend,
    /// Image store selection.
    pub image_backend: ImageBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8080`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:8080`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `MAX_IMAGE_BYTES`      | `5242880`                  |
    ///
    /// Backend variables are documented on [`DataBackend::from_env`] and
    /// [`ImageBackend::from_env`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port: u16 = env_parse("PORT", 8080)?;

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:8080")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_parse("REQUEST_TIMEOUT_SECS", 30)?;
        let max_image_bytes: usize = env_parse("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_image_bytes,
            data_backend: DataBackend::from_env()?,
            image_backend: ImageBackend::from_env()?,
        })
    }
}
