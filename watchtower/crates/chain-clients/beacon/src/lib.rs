pub mod error;
pub mod types;

use std::sync::OnceLock;

use async_trait::async_trait;
use color_eyre::eyre::Result;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use watchtower_chain_client_interface::{BeaconBlock, BeaconClient, BeaconConfig, BeaconHead};

pub use crate::error::BeaconClientError;
use crate::types::{DataResponse, FinalityCheckpoints, GenesisData, HeaderData, SignedBlock, SpecData};

/// Beacon node client over the standard REST API.
pub struct BeaconHttpClient {
    client: reqwest::Client,
    base_url: Url,
    /// Genesis and slot timing never change for a running chain.
    config: OnceLock<BeaconConfig>,
}

impl BeaconHttpClient {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: Url) -> Self {
        Self { client, base_url, config: OnceLock::new() }
    }

    fn endpoint(&self, operation: &str, path: &str) -> Result<Url, BeaconClientError> {
        let raw = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path.trim_start_matches('/'));
        Url::parse(&raw)
            .map_err(|e| BeaconClientError::UrlError { operation: operation.to_string(), message: e.to_string() })
    }

    /// GET `path` and decode the `data` envelope.
    ///
    /// # Returns
    /// * `Ok(None)` - if the node answered 404
    async fn get_data<T: DeserializeOwned>(&self, operation: &str, path: &str) -> Result<Option<T>, BeaconClientError> {
        let url = self.endpoint(operation, path)?;
        debug!(operation = operation, url = %url, "Querying beacon node");

        let response =
            self.client.get(url).send().await.map_err(|e| BeaconClientError::from_reqwest_error(operation, e))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(BeaconClientError::ApiError { operation: operation.to_string(), status, message });
        }

        let body = response.bytes().await.map_err(|e| BeaconClientError::from_reqwest_error(operation, e))?;
        let decoded: DataResponse<T> =
            serde_json::from_slice(&body).map_err(|e| BeaconClientError::parse_error(operation, e.to_string()))?;
        Ok(Some(decoded.data))
    }

    async fn get_required<T: DeserializeOwned>(&self, operation: &str, path: &str) -> Result<T, BeaconClientError> {
        self.get_data(operation, path).await?.ok_or_else(|| BeaconClientError::ApiError {
            operation: operation.to_string(),
            status: StatusCode::NOT_FOUND,
            message: format!("{} not found", path),
        })
    }
}

#[async_trait]
impl BeaconClient for BeaconHttpClient {
    async fn get_eth2_config(&self) -> Result<BeaconConfig> {
        if let Some(config) = self.config.get() {
            return Ok(*config);
        }

        let genesis: GenesisData = self.get_required("get_genesis", "eth/v1/beacon/genesis").await?;
        let spec: SpecData = self.get_required("get_spec", "eth/v1/config/spec").await?;

        let config = BeaconConfig {
            genesis_time: genesis.genesis_time,
            seconds_per_slot: spec.seconds_per_slot,
            slots_per_epoch: spec.slots_per_epoch,
        };
        Ok(*self.config.get_or_init(|| config))
    }

    async fn get_beacon_head(&self) -> Result<BeaconHead> {
        let config = self.get_eth2_config().await?;
        let header: HeaderData = self.get_required("get_head_header", "eth/v1/beacon/headers/head").await?;
        let checkpoints: FinalityCheckpoints =
            self.get_required("get_finality_checkpoints", "eth/v1/beacon/states/head/finality_checkpoints").await?;

        let slot = header.header.message.slot;
        let epoch = slot.checked_div(config.slots_per_epoch).unwrap_or_default();
        Ok(BeaconHead { slot, epoch, finalized_epoch: checkpoints.finalized.epoch })
    }

    async fn get_beacon_block(&self, slot: u64) -> Result<Option<BeaconBlock>> {
        let block: Option<SignedBlock> = self.get_data("get_block", &format!("eth/v2/beacon/blocks/{}", slot)).await?;
        Ok(block.map(|block| BeaconBlock {
            slot: block.message.slot,
            execution_block_number: block.message.body.execution_payload.map(|p| p.block_number).unwrap_or_default(),
        }))
    }
}
