use alloy::primitives::{keccak256, B256, U256};
use watchtower_chain_client_interface::RewardSnapshotSubmission;

use crate::contracts::RocketRewardsPool;
use crate::error::EthereumClientError;

/// Storage key of a registered contract address: `keccak256("contract.address" ++ name)`.
pub fn contract_address_key(name: &str) -> B256 {
    let mut preimage = Vec::with_capacity(16 + name.len());
    preimage.extend_from_slice(b"contract.address");
    preimage.extend_from_slice(name.as_bytes());
    keccak256(preimage)
}

pub fn u256_to_u64(field: &'static str, value: U256) -> Result<u64, EthereumClientError> {
    u64::try_from(value).map_err(|_| EthereumClientError::Overflow { field, value: value.to_string(), target: "u64" })
}

impl From<RewardSnapshotSubmission> for RocketRewardsPool::RewardSubmission {
    fn from(submission: RewardSnapshotSubmission) -> Self {
        Self {
            rewardIndex: submission.reward_index,
            executionBlock: submission.execution_block,
            consensusBlock: submission.consensus_block,
            merkleRoot: submission.merkle_root,
            merkleTreeCID: submission.merkle_tree_cid,
            intervalsPassed: submission.intervals_passed,
            treasuryRPL: submission.treasury_rpl,
            trustedNodeRPL: submission.trusted_node_rpl,
            nodeRPL: submission.node_rpl,
            nodeETH: submission.node_eth,
            userETH: submission.user_eth,
        }
    }
}
