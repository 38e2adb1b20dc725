//! Image storage for receipt uploads.
//!
//! The backend is picked at startup from `IMAGE_BACKEND`:
//! - `local`: [`LocalImageStore`], files on disk served by the API
//! - `s3`: [`S3ImageStore`], objects in an S3 or S3-compatible bucket

use std::path::PathBuf;
use std::sync::Arc;

use receipts_core::config::{env_bool, env_opt, env_or, env_required, ConfigError};

pub mod local;
pub mod s3;
pub mod store;

pub use local::LocalImageStore;
pub use s3::{S3ImageStore, S3Settings};
pub use store::{public_url, CloudError, ImageStore};

/// Which image store the server uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageBackend {
    Local { dir: PathBuf, public_base: String },
    S3(S3Settings),
}

impl ImageBackend {
    /// Load from environment variables.
    ///
    /// | Env Var              | Default                     |
    /// |----------------------|-----------------------------|
    /// | `IMAGE_BACKEND`      | `local` (`local`, `s3`)     |
    /// | `UPLOAD_DIR`         | `uploads`                   |
    /// | `UPLOAD_PUBLIC_BASE` | `/uploads`                  |
    /// | `S3_BUCKET`          | required for `s3`           |
    /// | `S3_ENDPOINT`        | unset (AWS)                 |
    /// | `S3_PUBLIC_BASE_URL` | derived from bucket/endpoint |
    /// | `S3_PUBLIC_READ`     | `false`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let name = env_or("IMAGE_BACKEND", "local");
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local {
                dir: PathBuf::from(env_or("UPLOAD_DIR", "uploads")),
                public_base: env_or("UPLOAD_PUBLIC_BASE", "/uploads"),
            }),
            "s3" => Ok(Self::S3(S3Settings {
                bucket: env_required("S3_BUCKET")?,
                endpoint: env_opt("S3_ENDPOINT"),
                public_base_url: env_opt("S3_PUBLIC_BASE_URL"),
                public_read: env_bool("S3_PUBLIC_READ", false)?,
            })),
            _ => Err(ConfigError::Invalid {
                key: "IMAGE_BACKEND",
                value: name,
                reason: "expected one of: local, s3".into(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Local { .. } => "local",
            Self::S3(_) => "s3",
        }
    }

    /// Build the configured store.
    pub async fn connect(&self) -> Arc<dyn ImageStore> {
        match self {
            Self::Local { dir, public_base } => {
                Arc::new(LocalImageStore::new(dir.clone(), public_base.clone()))
            }
            Self::S3(settings) => Arc::new(S3ImageStore::connect(settings).await),
        }
    }
}
