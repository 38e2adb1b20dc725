use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid object name '{0}'")]
    InvalidObjectName(String),

    #[error("Upload failed: {0}")]
    Upload(String),
}

/// Object storage for uploaded receipt images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Short backend name for logs and the health endpoint.
    fn backend(&self) -> &'static str;

    /// Store `bytes` under `object_name` and return the object's public URL.
    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CloudError>;
}

/// Join a public base URL and an object name with exactly one slash.
pub fn public_url(base: &str, object_name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), object_name)
}

/// Object names are flat: no separators, no leading dot.
pub(crate) fn check_object_name(object_name: &str) -> Result<(), CloudError> {
    if object_name.is_empty()
        || object_name.starts_with('.')
        || object_name.contains(['/', '\\'])
    {
        return Err(CloudError::InvalidObjectName(object_name.to_string()));
    }
    Ok(())
}
