use std::collections::BTreeMap;

use alloy::primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use strum_macros::Display;
use watchtower_chain_client_interface::RewardSnapshotSubmission;

/// Whether a node outside the oracle set builds rewards trees itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RewardsTreeMode {
    /// Fetch published trees, never generate locally
    #[default]
    Download,
    /// Generate every tree locally once its interval closes
    Generate,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalRewards {
    #[serde_as(as = "DisplayFromStr")]
    pub protocol_dao_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub total_collateral_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub total_oracle_dao_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub total_smoothing_pool_eth: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub pool_staker_smoothing_pool_eth: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub node_operator_smoothing_pool_eth: U256,
}

/// Rewards earmarked for one reward network (L1 is network 0).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRewardsInfo {
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub oracle_dao_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub smoothing_pool_eth: U256,
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRewardsInfo {
    pub reward_network: u64,
    #[serde_as(as = "DisplayFromStr")]
    pub collateral_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub oracle_dao_rpl: U256,
    #[serde_as(as = "DisplayFromStr")]
    pub smoothing_pool_eth: U256,
    #[serde(default)]
    pub merkle_proof: Vec<B256>,
}

/// Header of a rewards tree file.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsFileHeader {
    pub rewards_file_version: u64,
    pub ruleset_version: u64,
    pub index: u64,
    pub network: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub consensus_start_block: u64,
    pub consensus_end_block: u64,
    pub execution_start_block: u64,
    pub execution_end_block: u64,
    pub intervals_passed: u64,
    pub merkle_root: B256,
    #[serde(default)]
    pub minipool_performance_file_cid: String,
    pub total_rewards: TotalRewards,
    #[serde_as(as = "BTreeMap<DisplayFromStr, _>")]
    pub network_rewards: BTreeMap<u64, NetworkRewardsInfo>,
}

/// A complete rewards tree for one interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardsArtifact {
    #[serde(flatten)]
    pub header: RewardsFileHeader,
    #[serde(default)]
    pub node_rewards: BTreeMap<Address, NodeRewardsInfo>,
}

impl RewardsArtifact {
    /// Builds the on-chain snapshot submission for this tree, published under `tree_cid`.
    ///
    /// Reward networks are read from 0 upwards and stop at the first gap.
    pub fn to_submission(&self, tree_cid: String) -> RewardSnapshotSubmission {
        let header = &self.header;
        let mut submission = RewardSnapshotSubmission {
            reward_index: U256::from(header.index),
            execution_block: U256::from(header.execution_end_block),
            consensus_block: U256::from(header.consensus_end_block),
            merkle_root: header.merkle_root,
            merkle_tree_cid: tree_cid,
            intervals_passed: U256::from(header.intervals_passed),
            treasury_rpl: header.total_rewards.protocol_dao_rpl,
            user_eth: header.total_rewards.pool_staker_smoothing_pool_eth,
            ..Default::default()
        };

        for network in 0u64.. {
            let Some(rewards) = header.network_rewards.get(&network) else {
                break;
            };
            submission.node_rpl.push(rewards.collateral_rpl);
            submission.trusted_node_rpl.push(rewards.oracle_dao_rpl);
            submission.node_eth.push(rewards.smoothing_pool_eth);
        }

        submission
    }
}
