pub mod contracts;
pub mod conversion;
pub mod error;

use alloy::contract::{CallBuilder, CallDecoder};
use alloy::eips::{BlockId, BlockNumberOrTag};
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use color_eyre::Result;
use futures::future::try_join_all;
use tracing::{debug, info};
use url::Url;
use watchtower_chain_client_interface::{
    BlockHeader, ExecutionClient, OracleMember, PreparedCall, PriceSettings, RelayCallParams, RelayTarget,
    RewardInterval, TransactionSubmitter, TxOptions,
};

use crate::contracts::{
    RocketArbitrumPriceMessenger, RocketDAONodeTrusted, RocketDAOProtocolSettingsNetwork, RocketNetworkPrices,
    RocketPriceMessenger, RocketRewardsPool, RocketStorage, RocketZkSyncPriceMessenger, UniswapV3Pool,
};
use crate::conversion::{contract_address_key, u256_to_u64};
pub use crate::error::EthereumClientError;

const ROCKET_REWARDS_POOL: &str = "rocketRewardsPool";
const ROCKET_NETWORK_PRICES: &str = "rocketNetworkPrices";
const ROCKET_DAO_NODE_TRUSTED: &str = "rocketDAONodeTrusted";
const ROCKET_DAO_PROTOCOL_SETTINGS_NETWORK: &str = "rocketDAOProtocolSettingsNetwork";

#[derive(Clone, Debug)]
pub struct EthereumValidatedArgs {
    pub rpc_url: Url,
    pub private_key: String,
    /// Address of the protocol's storage contract, the registry of every other contract.
    pub storage_address: Address,
}

/// Execution layer client backed by an alloy HTTP provider with a local signer.
pub struct EthereumClient {
    provider: DynProvider,
    node_address: Address,
    storage_address: Address,
}

impl EthereumClient {
    pub fn new_with_args(args: &EthereumValidatedArgs) -> Result<Self, EthereumClientError> {
        let signer: PrivateKeySigner =
            args.private_key.parse().map_err(|e| EthereumClientError::InvalidPrivateKey(format!("{}", e)))?;
        let node_address = signer.address();
        let wallet = EthereumWallet::from(signer);

        let provider = ProviderBuilder::new().wallet(wallet).connect_http(args.rpc_url.clone()).erased();

        Ok(Self { provider, node_address, storage_address: args.storage_address })
    }

    fn storage(&self) -> RocketStorage::RocketStorageInstance<DynProvider> {
        RocketStorage::new(self.storage_address, self.provider.clone())
    }

    /// Resolves a protocol contract through the storage registry at `block`.
    async fn contract_address(&self, name: &'static str, block: BlockId) -> Result<Address, EthereumClientError> {
        let address = self.storage().getAddress(contract_address_key(name)).block(block).call().await?;
        if address == Address::ZERO {
            return Err(EthereumClientError::MissingContract(name));
        }
        Ok(address)
    }

    async fn wait_for_success(&self, pending: PendingTransactionBuilder<alloy::network::Ethereum>) -> Result<B256> {
        let tx_hash = *pending.tx_hash();
        info!(tx_hash = %tx_hash, "Transaction sent, waiting for receipt");
        let receipt = pending.get_receipt().await.map_err(EthereumClientError::from)?;
        if !receipt.status() {
            return Err(EthereumClientError::Reverted(tx_hash.to_string()).into());
        }
        debug!(tx_hash = %tx_hash, block_number = ?receipt.block_number, "Transaction mined");
        Ok(tx_hash)
    }
}

fn apply_options<P: Provider, D: CallDecoder>(mut builder: CallBuilder<P, D>, options: &TxOptions) -> CallBuilder<P, D> {
    builder = builder.value(options.value);
    if let Some(gas_limit) = options.gas_limit {
        builder = builder.gas(gas_limit);
    }
    if let Some(max_fee) = options.max_fee_per_gas {
        builder = builder.max_fee_per_gas(max_fee);
    }
    if let Some(priority_fee) = options.max_priority_fee_per_gas {
        builder = builder.max_priority_fee_per_gas(priority_fee);
    }
    builder
}

fn at(block_number: u64) -> BlockId {
    BlockId::Number(BlockNumberOrTag::Number(block_number))
}

#[async_trait]
impl ExecutionClient for EthereumClient {
    async fn latest_block_number(&self) -> Result<u64> {
        Ok(self.provider.get_block_number().await.map_err(EthereumClientError::from)?)
    }

    async fn header_by_number(&self, block_number: u64) -> Result<BlockHeader> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(block_number))
            .await
            .map_err(EthereumClientError::from)?
            .ok_or(EthereumClientError::BlockNotFound(block_number))?;
        Ok(BlockHeader { number: block.header.number, hash: block.header.hash, timestamp: block.header.timestamp })
    }

    async fn storage_bool(&self, key: B256, block_number: Option<u64>) -> Result<bool> {
        let block = block_number.map(at).unwrap_or(BlockId::latest());
        Ok(self.storage().getBool(key).block(block).call().await.map_err(EthereumClientError::from)?)
    }

    async fn reward_interval(&self, block_number: u64) -> Result<RewardInterval> {
        let block = at(block_number);
        let pool = RocketRewardsPool::new(self.contract_address(ROCKET_REWARDS_POOL, block).await?, self.provider.clone());

        let index = pool.getRewardIndex().block(block).call().await.map_err(EthereumClientError::from)?;
        let start_time = pool.getClaimIntervalTimeStart().block(block).call().await.map_err(EthereumClientError::from)?;
        let duration = pool.getClaimIntervalTime().block(block).call().await.map_err(EthereumClientError::from)?;

        Ok(RewardInterval {
            index: u256_to_u64("reward_index", index)?,
            start_time: u256_to_u64("interval_start", start_time)?,
            duration: u256_to_u64("interval_duration", duration)?,
        })
    }

    async fn price_settings(&self, block_number: u64) -> Result<PriceSettings> {
        let block = at(block_number);
        let settings = RocketDAOProtocolSettingsNetwork::new(
            self.contract_address(ROCKET_DAO_PROTOCOL_SETTINGS_NETWORK, block).await?,
            self.provider.clone(),
        );
        let prices =
            RocketNetworkPrices::new(self.contract_address(ROCKET_NETWORK_PRICES, block).await?, self.provider.clone());

        let submit_prices_enabled =
            settings.getSubmitPricesEnabled().block(block).call().await.map_err(EthereumClientError::from)?;
        let prices_block = prices.getPricesBlock().block(block).call().await.map_err(EthereumClientError::from)?;
        let latest_reportable =
            prices.getLatestReportableBlock().block(block).call().await.map_err(EthereumClientError::from)?;

        Ok(PriceSettings {
            submit_prices_enabled,
            prices_block: u256_to_u64("prices_block", prices_block)?,
            latest_reportable_block: u256_to_u64("latest_reportable_block", latest_reportable)?,
        })
    }

    async fn oracle_members(&self, block_number: u64) -> Result<Vec<OracleMember>> {
        let block = at(block_number);
        let dao =
            RocketDAONodeTrusted::new(self.contract_address(ROCKET_DAO_NODE_TRUSTED, block).await?, self.provider.clone());

        let count = dao.getMemberCount().block(block).call().await.map_err(EthereumClientError::from)?;
        let count = u256_to_u64("member_count", count)?;

        let members = try_join_all((0..count).map(|i| {
            let dao = &dao;
            async move {
                let address = dao.getMemberAt(U256::from(i)).block(block).call().await?;
                let joined_time = dao.getMemberJoinedTime(address).block(block).call().await?;
                Ok::<_, EthereumClientError>(OracleMember {
                    address,
                    joined_time: u256_to_u64("member_joined_time", joined_time)?,
                })
            }
        }))
        .await?;

        Ok(members)
    }

    async fn observe_pool(&self, pool: Address, seconds_ago: Vec<u32>, block_number: u64) -> Result<Vec<i64>> {
        let pool = UniswapV3Pool::new(pool, self.provider.clone());
        let observation =
            pool.observe(seconds_ago).block(at(block_number)).call().await.map_err(EthereumClientError::from)?;
        Ok(observation.tickCumulatives.into_iter().map(|tick| tick.as_i64()).collect())
    }

    async fn rates_stale(&self, messengers: Vec<(RelayTarget, Address)>, block_number: u64) -> Result<Vec<bool>> {
        let block = at(block_number);
        let flags = try_join_all(messengers.into_iter().map(|(_, address)| {
            let messenger = RocketPriceMessenger::new(address, self.provider.clone());
            async move { messenger.rateStale().block(block).call().await }
        }))
        .await
        .map_err(EthereumClientError::from)?;
        Ok(flags)
    }

    async fn suggested_max_fee_per_gas(&self) -> Result<u128> {
        let estimate = self.provider.estimate_eip1559_fees().await.map_err(EthereumClientError::from)?;
        Ok(estimate.max_fee_per_gas)
    }
}

#[async_trait]
impl TransactionSubmitter for EthereumClient {
    fn node_address(&self) -> Address {
        self.node_address
    }

    async fn submit(&self, call: PreparedCall, options: TxOptions) -> Result<B256> {
        let latest = BlockId::latest();
        let label = call.label();
        debug!(call = label, value = %options.value, "Preparing transaction");

        let pending = match call {
            PreparedCall::SubmitRewardSnapshot(submission) => {
                let pool = RocketRewardsPool::new(
                    self.contract_address(ROCKET_REWARDS_POOL, latest).await?,
                    self.provider.clone(),
                );
                apply_options(pool.submitRewardSnapshot(submission.into()), &options).send().await
            }
            PreparedCall::SubmitPrices { block_number, rpl_price } => {
                let prices = RocketNetworkPrices::new(
                    self.contract_address(ROCKET_NETWORK_PRICES, latest).await?,
                    self.provider.clone(),
                );
                apply_options(prices.submitPrices(block_number, rpl_price), &options).send().await
            }
            PreparedCall::SubmitRate { messenger, params: RelayCallParams::Plain, .. } => {
                let messenger = RocketPriceMessenger::new(messenger, self.provider.clone());
                apply_options(messenger.submitRate(), &options).send().await
            }
            PreparedCall::SubmitRate {
                messenger,
                params: RelayCallParams::Arbitrum { max_submission_cost, gas_limit, max_fee_per_gas },
                ..
            } => {
                let messenger = RocketArbitrumPriceMessenger::new(messenger, self.provider.clone());
                apply_options(messenger.submitRate(max_submission_cost, gas_limit, max_fee_per_gas), &options)
                    .send()
                    .await
            }
            PreparedCall::SubmitRate {
                messenger,
                params: RelayCallParams::ZkSyncEra { l2_gas_limit, l2_gas_per_pubdata_byte_limit },
                ..
            } => {
                let messenger = RocketZkSyncPriceMessenger::new(messenger, self.provider.clone());
                apply_options(messenger.submitRate(l2_gas_limit, l2_gas_per_pubdata_byte_limit), &options)
                    .send()
                    .await
            }
        }
        .map_err(EthereumClientError::from)?;

        self.wait_for_success(pending).await
    }
}
