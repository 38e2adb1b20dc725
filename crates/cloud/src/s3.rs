//! S3 (or S3-compatible) image store.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;

use crate::store::{check_object_name, public_url, CloudError, ImageStore};

/// Connection settings for [`S3ImageStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub bucket: String,
    /// Custom endpoint for S3-compatible services; switches to path-style addressing.
    pub endpoint: Option<String>,
    /// Base URL objects are publicly reachable under.
    pub public_base_url: Option<String>,
    /// Apply the `public-read` canned ACL to uploads.
    pub public_read: bool,
}

impl S3Settings {
    /// The base URL used to build public object URLs.
    pub fn resolved_public_base(&self) -> String {
        match (&self.public_base_url, &self.endpoint) {
            (Some(base), _) => base.clone(),
            (None, Some(endpoint)) => public_url(endpoint, &self.bucket),
            (None, None) => format!("https://{}.s3.amazonaws.com", self.bucket),
        }
    }
}

pub struct S3ImageStore {
    client: Client,
    bucket: String,
    public_base: String,
    public_read: bool,
}

impl S3ImageStore {
    /// Build a client from the ambient AWS configuration (env, profile, IMDS).
    pub async fn connect(settings: &S3Settings) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }
        Self::with_client(Client::from_conf(builder.build()), settings)
    }

    pub fn with_client(client: Client, settings: &S3Settings) -> Self {
        Self {
            client,
            bucket: settings.bucket.clone(),
            public_base: settings.resolved_public_base(),
            public_read: settings.public_read,
        }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    fn backend(&self) -> &'static str {
        "s3"
    }

    async fn put(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CloudError> {
        check_object_name(object_name)?;
        let size = bytes.len();

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(object_name)
            .content_type(content_type)
            .body(ByteStream::from(bytes));
        if self.public_read {
            request = request.acl(ObjectCannedAcl::PublicRead);
        }

        request.send().await.map_err(|e| {
            tracing::error!(bucket = %self.bucket, object = object_name, error = %DisplayErrorContext(&e), "S3 upload failed");
            CloudError::Upload(DisplayErrorContext(&e).to_string())
        })?;

        tracing::info!(bucket = %self.bucket, object = object_name, size, "Uploaded image to S3");
        Ok(public_url(&self.public_base, object_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> S3Settings {
        S3Settings {
            bucket: "receipts".into(),
            endpoint: None,
            public_base_url: None,
            public_read: false,
        }
    }

    #[test]
    fn default_public_base_is_virtual_hosted() {
        assert_eq!(
            settings().resolved_public_base(),
            "https://receipts.s3.amazonaws.com"
        );
    }

    #[test]
    fn custom_endpoint_uses_path_style_base() {
        let s = S3Settings {
            endpoint: Some("http://localhost:9000/".into()),
            ..settings()
        };
        assert_eq!(s.resolved_public_base(), "http://localhost:9000/receipts");
    }

    #[test]
    fn explicit_public_base_wins() {
        let s = S3Settings {
            endpoint: Some("http://localhost:9000".into()),
            public_base_url: Some("https://cdn.example.com".into()),
            ..settings()
        };
        assert_eq!(s.resolved_public_base(), "https://cdn.example.com");
    }
}
