use color_eyre::Result;
use thiserror::Error;
use tracing::{debug, info};
use watchtower_chain_client_interface::{BeaconClient, BeaconConfig};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Malformed chain parameters: {0}")]
    MalformedChainParameters(String),

    #[error("Interval end time {end_time} is before genesis {genesis_time}")]
    EndBeforeGenesis { end_time: u64, genesis_time: u64 },

    #[error("No proposed block found between slots {to_slot} and {from_slot}")]
    NoProposedBlock { from_slot: u64, to_slot: u64 },
}

/// Epoch-aligned snapshot point for an interval end time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotPlan {
    /// Last slot of `target_epoch`
    pub target_slot: u64,
    pub target_epoch: u64,
    /// Always `target_epoch + 1`
    pub required_finalized_epoch: u64,
}

/// A snapshot point backed by a proposed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotTarget {
    pub end_time: u64,
    pub target_slot: u64,
    pub target_epoch: u64,
    pub required_finalized_epoch: u64,
    /// Slot of the proposed block the walk settled on
    pub consensus_block: u64,
    pub execution_block: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotResolution {
    Ready(SnapshotTarget),
    AwaitingFinality { target_epoch: u64, required_finalized_epoch: u64, finalized_epoch: u64 },
}

/// Maps an interval end time onto the last slot of its epoch.
pub fn plan_snapshot(end_time: u64, config: &BeaconConfig) -> Result<SnapshotPlan, SnapshotError> {
    if config.seconds_per_slot == 0 {
        return Err(SnapshotError::MalformedChainParameters("seconds per slot is zero".to_string()));
    }
    if config.slots_per_epoch == 0 {
        return Err(SnapshotError::MalformedChainParameters("slots per epoch is zero".to_string()));
    }
    if end_time < config.genesis_time {
        return Err(SnapshotError::EndBeforeGenesis { end_time, genesis_time: config.genesis_time });
    }

    let slot = (end_time - config.genesis_time).div_ceil(config.seconds_per_slot);
    let target_epoch = slot / config.slots_per_epoch;
    let target_slot = target_epoch
        .checked_add(1)
        .and_then(|next| next.checked_mul(config.slots_per_epoch))
        .map(|first_of_next| first_of_next - 1)
        .ok_or_else(|| SnapshotError::MalformedChainParameters(format!("epoch {} overflows", target_epoch)))?;

    Ok(SnapshotPlan { target_slot, target_epoch, required_finalized_epoch: target_epoch + 1 })
}

/// Finds the consensus and execution blocks a rewards snapshot is taken at.
pub struct SnapshotBlockResolver<'a> {
    beacon: &'a dyn BeaconClient,
    /// Maximum number of empty slots skipped before giving up
    max_walkback: u64,
}

impl<'a> SnapshotBlockResolver<'a> {
    pub fn new(beacon: &'a dyn BeaconClient, max_walkback: u64) -> Self {
        Self { beacon, max_walkback }
    }

    /// Resolves the snapshot for `end_time` once its epoch is safely finalized.
    ///
    /// Returns [`SnapshotResolution::AwaitingFinality`] without touching the beacon node when
    /// `finalized_epoch` is behind the epoch after the target.
    pub async fn resolve(
        &self,
        end_time: u64,
        config: &BeaconConfig,
        finalized_epoch: u64,
    ) -> Result<SnapshotResolution> {
        let plan = plan_snapshot(end_time, config)?;

        if finalized_epoch < plan.required_finalized_epoch {
            info!(
                target_epoch = plan.target_epoch,
                required_finalized_epoch = plan.required_finalized_epoch,
                finalized_epoch,
                "Snapshot epoch is not finalized yet"
            );
            return Ok(SnapshotResolution::AwaitingFinality {
                target_epoch: plan.target_epoch,
                required_finalized_epoch: plan.required_finalized_epoch,
                finalized_epoch,
            });
        }

        let lowest_slot = plan.target_slot.saturating_sub(self.max_walkback);
        let mut slot = plan.target_slot;
        loop {
            if let Some(block) = self.beacon.get_beacon_block(slot).await? {
                debug!(slot, execution_block = block.execution_block_number, "Found snapshot block");
                return Ok(SnapshotResolution::Ready(SnapshotTarget {
                    end_time,
                    target_slot: plan.target_slot,
                    target_epoch: plan.target_epoch,
                    required_finalized_epoch: plan.required_finalized_epoch,
                    consensus_block: block.slot,
                    execution_block: block.execution_block_number,
                }));
            }
            debug!(slot, "Slot is empty, walking back");
            if slot == lowest_slot {
                return Err(SnapshotError::NoProposedBlock { from_slot: plan.target_slot, to_slot: lowest_slot }.into());
            }
            slot -= 1;
        }
    }
}
