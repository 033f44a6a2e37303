use std::sync::Arc;

use alloy::primitives::Address;
use color_eyre::Result;
use watchtower_beacon_client::BeaconHttpClient;
use watchtower_chain_client_interface::{BeaconClient, ExecutionClient, NetworkState, TransactionSubmitter};
use watchtower_ethereum_client::{EthereumClient, EthereumValidatedArgs};

use crate::cli::RunCmd;
use crate::core::artifacts::ArtifactStorage;
use crate::core::client::distribution::Web3StorageClient;
use crate::core::client::generator::HttpRewardsGenerator;
use crate::core::client::{DistributionClient, RewardsGenerator};
use crate::core::state::load_network_state;
use crate::types::params::{
    FeeParams, PriceParams, RelayParams, RewardsParams, ServiceParams, WatchtowerParams, Web3StorageValidatedArgs,
};
use crate::WatchtowerResult;

/// The app config. It can be accessed from anywhere inside the service
/// by calling the accessor methods of [`Config`].
pub struct Config {
    params: WatchtowerParams,
    /// Execution layer reads
    execution_client: Arc<dyn ExecutionClient>,
    /// Signing and sending transactions
    transaction_submitter: Arc<dyn TransactionSubmitter>,
    /// Consensus layer reads
    beacon_client: Arc<dyn BeaconClient>,
    /// Artifact publication
    distribution_client: Arc<dyn DistributionClient>,
    /// Rewards tree generation
    rewards_generator: Arc<dyn RewardsGenerator>,
    artifact_storage: ArtifactStorage,
}

impl Config {
    pub fn new(
        params: WatchtowerParams,
        execution_client: Arc<dyn ExecutionClient>,
        transaction_submitter: Arc<dyn TransactionSubmitter>,
        beacon_client: Arc<dyn BeaconClient>,
        distribution_client: Arc<dyn DistributionClient>,
        rewards_generator: Arc<dyn RewardsGenerator>,
    ) -> Self {
        let artifact_storage = ArtifactStorage::new(params.rewards.rewards_dir.clone(), params.rewards.network.clone());
        Self {
            params,
            execution_client,
            transaction_submitter,
            beacon_client,
            distribution_client,
            rewards_generator,
            artifact_storage,
        }
    }

    /// Builds every client from the run command.
    pub fn from_run_cmd(run_cmd: &RunCmd) -> WatchtowerResult<Self> {
        let params = WatchtowerParams::try_from(run_cmd)?;

        let ethereum_args = EthereumValidatedArgs::try_from(run_cmd.ethereum_args.clone())?;
        let ethereum_client = Arc::new(EthereumClient::new_with_args(&ethereum_args)?);
        let beacon_client = Arc::new(BeaconHttpClient::new(run_cmd.beacon_args.beacon_url.clone()));
        let distribution_args = Web3StorageValidatedArgs::from(run_cmd.distribution_args.clone());
        let distribution_client = Arc::new(Web3StorageClient::new_with_args(&distribution_args));
        let rewards_generator = Arc::new(HttpRewardsGenerator::new(params.rewards.generator_url.clone()));

        Ok(Self::new(
            params,
            ethereum_client.clone(),
            ethereum_client,
            beacon_client,
            distribution_client,
            rewards_generator,
        ))
    }

    /// Reads the chain state the tasks act on.
    pub async fn network_state(&self) -> Result<NetworkState> {
        load_network_state(self.execution_client.as_ref(), self.beacon_client.as_ref()).await
    }

    /// Address the node submits from
    pub fn node_address(&self) -> Address {
        self.transaction_submitter.node_address()
    }

    pub fn params(&self) -> &WatchtowerParams {
        &self.params
    }

    pub fn rewards_params(&self) -> &RewardsParams {
        &self.params.rewards
    }

    pub fn fee_params(&self) -> &FeeParams {
        &self.params.fees
    }

    pub fn price_params(&self) -> &PriceParams {
        &self.params.prices
    }

    pub fn relay_params(&self) -> &RelayParams {
        &self.params.relay
    }

    pub fn service_params(&self) -> &ServiceParams {
        &self.params.service
    }

    pub fn execution_client(&self) -> &dyn ExecutionClient {
        self.execution_client.as_ref()
    }

    pub fn transaction_submitter(&self) -> &dyn TransactionSubmitter {
        self.transaction_submitter.as_ref()
    }

    pub fn beacon_client(&self) -> &dyn BeaconClient {
        self.beacon_client.as_ref()
    }

    pub fn distribution_client(&self) -> &dyn DistributionClient {
        self.distribution_client.as_ref()
    }

    pub fn rewards_generator(&self) -> &dyn RewardsGenerator {
        self.rewards_generator.as_ref()
    }

    pub fn artifact_storage(&self) -> &ArtifactStorage {
        &self.artifact_storage
    }
}
