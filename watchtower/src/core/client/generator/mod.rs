pub mod http;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpRewardsGenerator;

use crate::types::RewardsArtifact;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Network error while generating interval {index}: {message}")]
    NetworkError { index: u64, message: String },

    #[error("Generator rejected interval {index} (status {status}): {message}")]
    ApiError { index: u64, status: StatusCode, message: String },

    #[error("Failed to parse generated rewards for interval {index}: {message}")]
    ParseError { index: u64, message: String },

    #[error("Generator returned interval {actual} for a request of interval {expected}")]
    WrongInterval { expected: u64, actual: u64 },
}

/// Everything the tree generator needs to rebuild an interval deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub network: String,
    pub index: u64,
    /// Number of elapsed intervals folded into this tree.
    pub intervals_passed: u64,
    pub start_time: u64,
    pub end_time: u64,
    pub consensus_block: u64,
    pub execution_block: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRewards {
    pub rewards_file: RewardsArtifact,
    pub minipool_performance_file: serde_json::Value,
}

/// Computes the rewards tree of an interval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RewardsGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedRewards, GeneratorError>;
}
