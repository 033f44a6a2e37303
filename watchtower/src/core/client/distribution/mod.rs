pub mod web3_storage;

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

pub use web3_storage::Web3StorageClient;

#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("Network error while uploading {file_name}: {message}")]
    NetworkError { file_name: String, message: String },

    #[error("Upload of {file_name} rejected (status {status}): {message}")]
    ApiError { file_name: String, status: StatusCode, message: String },

    #[error("Failed to parse upload response for {file_name}: {message}")]
    ParseError { file_name: String, message: String },

    #[error("Distribution client is not configured: {0}")]
    NotConfigured(String),
}

/// Publishes artifacts to a content-addressed network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistributionClient: Send + Sync {
    /// Uploads `data` under `file_name`.
    ///
    /// # Returns
    /// * `Ok(String)` - the content identifier of the uploaded data
    async fn upload(&self, file_name: &str, data: Vec<u8>) -> Result<String, DistributionError>;
}
