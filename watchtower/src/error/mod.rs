use opentelemetry_otlp::ExporterBuildError;
use opentelemetry_sdk::error::OTelSdkError;
use thiserror::Error;
use watchtower_ethereum_client::EthereumClientError;

use crate::core::artifacts::ArtifactError;

/// Result type for watchtower operations
pub type WatchtowerResult<T> = Result<T, WatchtowerError>;

/// Error types for the watchtower service
#[derive(Error, Debug)]
pub enum WatchtowerError {
    /// Run Command error
    #[error("Run Command Error: {0}")]
    RunCommandError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Ethereum client error: {0}")]
    EthereumClientError(#[from] EthereumClientError),

    #[error("Artifact storage error: {0}")]
    ArtifactError(#[from] ArtifactError),

    #[error("Watchtower Error: {0}")]
    WatchtowerAnyHowError(#[from] anyhow::Error),

    #[error("OTEL Exporter Build Error: {0}")]
    ExporterBuildError(#[from] ExporterBuildError),

    #[error("OTEL SDK Error: {0}")]
    OTelSdkError(#[from] OTelSdkError),
}
