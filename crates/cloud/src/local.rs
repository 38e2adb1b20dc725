//! Filesystem image store. The API serves `dir` under the public base path.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::store::{check_object_name, public_url, CloudError, ImageStore};

pub struct LocalImageStore {
    dir: PathBuf,
    public_base: String,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base: public_base.into(),
        }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    fn backend(&self) -> &'static str {
        "local"
    }

    async fn put(
        &self,
        object_name: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, CloudError> {
        check_object_name(object_name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(object_name);
        tokio::fs::write(&path, &bytes).await?;
        tracing::debug!(object = object_name, size = bytes.len(), path = %path.display(), "Stored image on disk");
        Ok(public_url(&self.public_base, object_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_file_and_returns_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(tmp.path().join("uploads"), "/uploads");

        let url = store
            .put("abc-scan.png", "image/png", b"png-bytes".to_vec())
            .await
            .unwrap();

        assert_eq!(url, "/uploads/abc-scan.png");
        let written = std::fs::read(tmp.path().join("uploads/abc-scan.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn put_refuses_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(tmp.path(), "/uploads");
        let err = store
            .put("../outside.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, CloudError::InvalidObjectName(_)));
    }
}
