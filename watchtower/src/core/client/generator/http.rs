use async_trait::async_trait;
use tracing::info;
use url::Url;

use super::{GeneratedRewards, GenerationRequest, GeneratorError, RewardsGenerator};

/// Delegates tree generation to an HTTP service.
pub struct HttpRewardsGenerator {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpRewardsGenerator {
    pub fn new(base_url: Url) -> Self {
        Self { client: reqwest::Client::new(), base_url }
    }
}

#[async_trait]
impl RewardsGenerator for HttpRewardsGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedRewards, GeneratorError> {
        let index = request.index;
        let url = self
            .base_url
            .join("v1/rewards-trees")
            .map_err(|e| GeneratorError::NetworkError { index, message: e.to_string() })?;

        info!(index, intervals_passed = request.intervals_passed, "Requesting rewards tree generation");
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| GeneratorError::NetworkError { index, message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeneratorError::ApiError { index, status, message });
        }

        let generated: GeneratedRewards =
            response.json().await.map_err(|e| GeneratorError::ParseError { index, message: e.to_string() })?;
        if generated.rewards_file.header.index != index {
            return Err(GeneratorError::WrongInterval { expected: index, actual: generated.rewards_file.header.index });
        }
        Ok(generated)
    }
}
