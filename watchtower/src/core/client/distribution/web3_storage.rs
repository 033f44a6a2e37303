use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, info};

use super::{DistributionClient, DistributionError};
use crate::types::params::Web3StorageValidatedArgs;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: String,
}

/// Uploads artifacts through the Web3.Storage HTTP API.
pub struct Web3StorageClient {
    client: reqwest::Client,
    args: Web3StorageValidatedArgs,
}

impl Web3StorageClient {
    pub fn new_with_args(args: &Web3StorageValidatedArgs) -> Self {
        Self { client: reqwest::Client::new(), args: args.clone() }
    }
}

#[async_trait]
impl DistributionClient for Web3StorageClient {
    async fn upload(&self, file_name: &str, data: Vec<u8>) -> Result<String, DistributionError> {
        let token = self.args.api_token.as_deref().ok_or_else(|| {
            DistributionError::NotConfigured("a Web3.Storage API token is required to upload artifacts".to_string())
        })?;
        let url = self.args.api_url.join("upload").map_err(|e| DistributionError::NetworkError {
            file_name: file_name.to_string(),
            message: e.to_string(),
        })?;

        debug!(file_name = file_name, size = data.len(), url = %url, "Uploading artifact");
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/octet-stream")
            .header("X-Name", file_name)
            .body(data)
            .send()
            .await
            .map_err(|e| DistributionError::NetworkError { file_name: file_name.to_string(), message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DistributionError::ApiError { file_name: file_name.to_string(), status, message });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| DistributionError::ParseError { file_name: file_name.to_string(), message: e.to_string() })?;

        info!(file_name = file_name, cid = %body.cid, "Uploaded artifact");
        Ok(body.cid)
    }
}
