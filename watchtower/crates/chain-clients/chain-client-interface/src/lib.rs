pub mod types;

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use color_eyre::eyre::Result;
use mockall::automock;

pub use types::*;

/// Read access to the consensus chain.
#[automock]
#[async_trait]
pub trait BeaconClient: Send + Sync {
    /// Genesis time and slot timing of the chain.
    async fn get_eth2_config(&self) -> Result<BeaconConfig>;

    /// Current head slot together with the latest finalized epoch.
    async fn get_beacon_head(&self) -> Result<BeaconHead>;

    /// Block proposed at `slot`.
    ///
    /// # Returns
    /// * `Ok(None)` - if the slot is empty (no block was proposed)
    async fn get_beacon_block(&self, slot: u64) -> Result<Option<BeaconBlock>>;
}

/// Read access to the execution chain and the protocol contracts deployed on it.
#[automock]
#[async_trait]
pub trait ExecutionClient: Send + Sync {
    async fn latest_block_number(&self) -> Result<u64>;

    async fn header_by_number(&self, block_number: u64) -> Result<BlockHeader>;

    /// Reads a boolean flag from the protocol's key/value storage contract.
    /// `None` reads at the latest block.
    async fn storage_bool(&self, key: B256, block_number: Option<u64>) -> Result<bool>;

    async fn reward_interval(&self, block_number: u64) -> Result<RewardInterval>;

    async fn price_settings(&self, block_number: u64) -> Result<PriceSettings>;

    async fn oracle_members(&self, block_number: u64) -> Result<Vec<OracleMember>>;

    /// Tick cumulatives of a Uniswap V3 style pool, one per entry of `seconds_ago`.
    async fn observe_pool(&self, pool: Address, seconds_ago: Vec<u32>, block_number: u64) -> Result<Vec<i64>>;

    /// Staleness flag of each messenger's relayed rate, in input order.
    async fn rates_stale(&self, messengers: Vec<(RelayTarget, Address)>, block_number: u64) -> Result<Vec<bool>>;

    /// Max fee per gas the node would currently pay, in wei.
    async fn suggested_max_fee_per_gas(&self) -> Result<u128>;
}

/// Signs and sends transactions on behalf of the node.
#[automock]
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Address transactions are sent from.
    fn node_address(&self) -> Address;

    /// Sends `call` and returns the transaction hash once it is mined.
    async fn submit(&self, call: PreparedCall, options: TxOptions) -> Result<B256>;
}
