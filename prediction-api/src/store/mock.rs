use crate::error::StoreError;
use crate::store::traits::ArtifactStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock implementation of ArtifactStore for unit testing
#[derive(Clone, Default)]
pub struct MockArtifactStore {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockArtifactStore {
    /// Create a new mock with no files
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `path`
    pub fn add_file(&self, path: &str, bytes: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), bytes.into());
    }

    /// Paths requested so far, in order
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArtifactStore for MockArtifactStore {
    async fn download(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        self.downloads.lock().unwrap().push(path.to_string());

        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}
