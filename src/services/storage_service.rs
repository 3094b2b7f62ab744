//! Download client for the PDF object store.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Downloads a single object as raw bytes.
    async fn download(&self, bucket: &str, path: &str) -> AppResult<Vec<u8>>;
}

/// Object store reached over the storage HTTP API
/// (`GET {base}/object/{bucket}/{path}`).
///
/// No request timeout is set here; the hosting layer's timeout semantics are
/// inherited as-is.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
    service_key: Option<SecretString>,
}

impl HttpObjectStore {
    pub fn from_config(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.storage_base_url.trim_end_matches('/').to_string(),
            service_key: config.storage_service_key.clone(),
        }
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/{}/{}", self.base_url, bucket, path)
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn download(&self, bucket: &str, path: &str) -> AppResult<Vec<u8>> {
        let mut request = self.client.get(self.object_url(bucket, path));

        if let Some(key) = &self.service_key {
            request = request
                .bearer_auth(key.expose_secret())
                .header("apikey", key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::InternalError(format!("Storage request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "Storage responded with status {} for {}/{}",
                response.status(),
                bucket,
                path
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::InternalError(format!("Storage read failed: {}", e)))?;

        Ok(bytes.to_vec())
    }
}
