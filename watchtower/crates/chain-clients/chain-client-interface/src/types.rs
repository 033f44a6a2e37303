use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Timing parameters of the consensus chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconConfig {
    pub genesis_time: u64,
    pub seconds_per_slot: u64,
    pub slots_per_epoch: u64,
}

impl BeaconConfig {
    /// Unix timestamp at which `slot` starts.
    pub fn slot_time(&self, slot: u64) -> u64 {
        self.genesis_time.saturating_add(self.seconds_per_slot.saturating_mul(slot))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconHead {
    pub slot: u64,
    pub epoch: u64,
    pub finalized_epoch: u64,
}

/// A proposed consensus block and the execution payload it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeaconBlock {
    pub slot: u64,
    pub execution_block_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    pub number: u64,
    pub hash: B256,
    pub timestamp: u64,
}

/// Reward accounting interval as recorded by the rewards pool contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewardInterval {
    pub index: u64,
    pub start_time: u64,
    pub duration: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceSettings {
    pub submit_prices_enabled: bool,
    /// Block of the last price update accepted by the network.
    pub prices_block: u64,
    /// Most recent block a price may be reported for.
    pub latest_reportable_block: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleMember {
    pub address: Address,
    pub joined_time: u64,
}

/// Point-in-time view of the chain values the watchtower tasks act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkState {
    pub el_block_number: u64,
    pub beacon_slot_number: u64,
    pub beacon_config: BeaconConfig,
    pub reward_interval: RewardInterval,
    pub price_settings: PriceSettings,
    /// Oracle members in contract order.
    pub oracle_members: Vec<OracleMember>,
}

impl NetworkState {
    pub fn is_oracle_member(&self, address: Address) -> bool {
        self.oracle_members.iter().any(|member| member.address == address)
    }
}

/// Chains that receive relayed price updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum RelayTarget {
    Optimism,
    Polygon,
    Arbitrum,
    ZkSyncEra,
    Base,
}

/// Arguments of `RocketRewardsPool.submitRewardSnapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RewardSnapshotSubmission {
    pub reward_index: U256,
    pub execution_block: U256,
    pub consensus_block: U256,
    pub merkle_root: B256,
    pub merkle_tree_cid: String,
    pub intervals_passed: U256,
    pub treasury_rpl: U256,
    pub trusted_node_rpl: Vec<U256>,
    pub node_rpl: Vec<U256>,
    pub node_eth: Vec<U256>,
    pub user_eth: U256,
}

/// Target specific arguments of a messenger `submitRate` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCallParams {
    Plain,
    Arbitrum { max_submission_cost: U256, gas_limit: U256, max_fee_per_gas: U256 },
    ZkSyncEra { l2_gas_limit: U256, l2_gas_per_pubdata_byte_limit: U256 },
}

/// A contract call the watchtower wants mined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedCall {
    SubmitRewardSnapshot(RewardSnapshotSubmission),
    SubmitPrices { block_number: U256, rpl_price: U256 },
    SubmitRate { target: RelayTarget, messenger: Address, params: RelayCallParams },
}

impl PreparedCall {
    pub fn label(&self) -> &'static str {
        match self {
            PreparedCall::SubmitRewardSnapshot(_) => "submit_reward_snapshot",
            PreparedCall::SubmitPrices { .. } => "submit_prices",
            PreparedCall::SubmitRate { .. } => "submit_rate",
        }
    }
}

/// Transaction level overrides. `None` leaves the value to the submitter's estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxOptions {
    pub value: U256,
    pub gas_limit: Option<u64>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}
