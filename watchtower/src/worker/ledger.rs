use alloy::primitives::{keccak256, Address, B256, U256};
use color_eyre::Result;
use watchtower_chain_client_interface::ExecutionClient;

use crate::types::constant::{PRICES_SUBMISSION_TAG, REWARDS_SNAPSHOT_SUBMISSION_TAG};

/// What a submission flag records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPurpose {
    RewardsSnapshot,
    Prices,
}

impl SubmissionPurpose {
    pub fn tag(&self) -> &'static str {
        match self {
            SubmissionPurpose::RewardsSnapshot => REWARDS_SNAPSHOT_SUBMISSION_TAG,
            SubmissionPurpose::Prices => PRICES_SUBMISSION_TAG,
        }
    }
}

/// `keccak256(tag ‖ address ‖ be32(subject) [‖ be32(value)])`
pub fn submission_key(purpose: SubmissionPurpose, address: Address, subject: U256, value: Option<U256>) -> B256 {
    let tag = purpose.tag().as_bytes();
    let mut preimage = Vec::with_capacity(tag.len() + 20 + 64);
    preimage.extend_from_slice(tag);
    preimage.extend_from_slice(address.as_slice());
    preimage.extend_from_slice(&subject.to_be_bytes::<32>());
    if let Some(value) = value {
        preimage.extend_from_slice(&value.to_be_bytes::<32>());
    }
    keccak256(preimage)
}

/// Reads the on-chain flags recording what this node already submitted.
pub struct SubmissionLedger<'a> {
    client: &'a dyn ExecutionClient,
}

impl<'a> SubmissionLedger<'a> {
    pub fn new(client: &'a dyn ExecutionClient) -> Self {
        Self { client }
    }

    pub async fn has_submitted(
        &self,
        purpose: SubmissionPurpose,
        address: Address,
        subject: U256,
        value: Option<U256>,
    ) -> Result<bool> {
        self.client.storage_bool(submission_key(purpose, address, subject, value), None).await
    }
}
