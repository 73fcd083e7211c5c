use crate::error::{LoadError, StoreError};
use crate::store::traits::ArtifactStore;
use async_trait::async_trait;
use std::time::Duration;

const FILES_API_PREFIX: &str = "/api/2.0/fs/files";

/// Client for the Databricks Files API
///
/// Downloads are a single authenticated GET against
/// `{host}/api/2.0/fs/files{path}`; the response body is the raw file.
pub struct DatabricksClient {
    http: reqwest::Client,
    host: String,
    token: String,
}

impl DatabricksClient {
    pub fn new(host: &str, token: &str, timeout: Duration) -> Result<Self, LoadError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LoadError::Client(e.to_string()))?;

        Ok(Self {
            http,
            host: normalize_host(host),
            token: token.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Full download URL for a workspace file path
    pub fn file_url(&self, path: &str) -> Result<String, StoreError> {
        if !path.starts_with('/') {
            return Err(StoreError::InvalidPath(path.to_string()));
        }
        Ok(format!("{}{}{}", self.host, FILES_API_PREFIX, path))
    }
}

/// Databricks hosts are often configured without a scheme
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[async_trait]
impl ArtifactStore for DatabricksClient {
    async fn download(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let url = self.file_url(path)?;

        tracing::debug!("Downloading artifact from {}", url);

        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(StoreError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Downloaded {} bytes from {}", bytes.len(), path);

        Ok(bytes.to_vec())
    }
}
