use crate::error::StoreError;
use async_trait::async_trait;

/// Abstraction over the remote blob store holding the model artifact
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Download the file at `path` and return its raw bytes
    async fn download(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}
