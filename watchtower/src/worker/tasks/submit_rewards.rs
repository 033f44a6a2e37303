use std::path::Path;
use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use watchtower_chain_client_interface::{NetworkState, PreparedCall, RewardInterval};

use super::{fee_options, WatchtowerTask};
use crate::core::artifacts::{cache, ArtifactStorage};
use crate::core::client::generator::GenerationRequest;
use crate::core::config::Config;
use crate::types::constant::UNPUBLISHED_PERFORMANCE_CID;
use crate::types::{RewardsArtifact, RewardsTreeMode};
use crate::utils::metrics::{task_attributes, WATCHTOWER_METRICS};
use crate::worker::checkpoint::{elapsed_intervals, latest_submission_timestamp};
use crate::worker::ledger::{SubmissionLedger, SubmissionPurpose};
use crate::worker::single_flight::SingleFlight;
use crate::worker::snapshot::{SnapshotBlockResolver, SnapshotResolution, SnapshotTarget};

const TASK_NAME: &str = "submit_rewards_tree";

/// Builds, publishes and submits the rewards tree of every closed reward interval.
pub struct SubmitRewardsTreeTask {
    flight: SingleFlight,
}

impl Default for SubmitRewardsTreeTask {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitRewardsTreeTask {
    pub fn new() -> Self {
        Self { flight: SingleFlight::new(TASK_NAME) }
    }

    /// Runs the foreground checks and starts the background execution when a snapshot is ready.
    ///
    /// # Returns
    /// * `Ok(None)` - nothing is due, finality is pending or a previous execution is still running
    /// * `Ok(Some(handle))` - handle of the started background execution
    pub(crate) async fn launch(&self, config: Arc<Config>, state: Arc<NetworkState>) -> Result<Option<JoinHandle<()>>> {
        let node_address = config.node_address();
        let is_member = state.is_oracle_member(node_address);
        if !is_member && config.rewards_params().tree_mode != RewardsTreeMode::Generate {
            debug!("Node is not an oracle member and does not generate trees, returning safely.");
            return Ok(None);
        }

        let interval = state.reward_interval;
        let chain_time = state.beacon_config.slot_time(state.beacon_slot_number);
        let elapsed = elapsed_intervals(chain_time, interval.start_time, interval.duration)?;
        if elapsed == 0 {
            debug!(index = interval.index, chain_time, "Reward interval has not closed yet, returning safely.");
            return Ok(None);
        }
        let end_time = latest_submission_timestamp(chain_time, interval.start_time, interval.duration)?;
        info!(index = interval.index, intervals_passed = elapsed, end_time, "Reward interval has closed");

        let head = config.beacon_client().get_beacon_head().await.wrap_err("Failed to get beacon head")?;
        let max_walkback =
            config.service_params().max_snapshot_walkback.unwrap_or(state.beacon_config.slots_per_epoch);
        let resolver = SnapshotBlockResolver::new(config.beacon_client(), max_walkback);
        let target = match resolver.resolve(end_time, &state.beacon_config, head.finalized_epoch).await? {
            SnapshotResolution::Ready(target) => target,
            SnapshotResolution::AwaitingFinality { target_epoch, finalized_epoch, .. } => {
                info!(
                    index = interval.index,
                    target_epoch,
                    finalized_epoch,
                    "Snapshot epoch has not been finalized yet, waiting."
                );
                return Ok(None);
            }
        };

        let job = RewardsTreeJob { config, node_address, is_member, interval, intervals_passed: elapsed, target };
        Ok(self.flight.spawn(job.execute()))
    }
}

#[async_trait]
impl WatchtowerTask for SubmitRewardsTreeTask {
    fn name(&self) -> &'static str {
        TASK_NAME
    }

    async fn run(&self, config: Arc<Config>, state: Arc<NetworkState>) -> Result<()> {
        self.launch(config, state).await.map(|_| ())
    }
}

/// Background part of the task: everything after the snapshot has been resolved.
struct RewardsTreeJob {
    config: Arc<Config>,
    node_address: Address,
    is_member: bool,
    interval: RewardInterval,
    intervals_passed: u64,
    target: SnapshotTarget,
}

impl RewardsTreeJob {
    async fn execute(self) -> Result<()> {
        let index = self.interval.index;
        let storage = self.config.artifact_storage();
        let tree_path = storage.rewards_tree_path(index);

        if let Some(artifact) = cache::load_valid(&tree_path, self.intervals_passed).await {
            info!(index, path = %tree_path.display(), "Rewards tree already exists");
            if !self.is_member || self.already_submitted().await? {
                return Ok(());
            }
            let bytes = serde_json::to_vec(&artifact).wrap_err("Failed to encode cached rewards tree")?;
            return self.publish_and_submit(&artifact, &tree_path, &bytes).await;
        }

        let artifact = self.generate().await?;
        let tree_bytes = storage.write_rewards_tree(&artifact).await?;
        info!(index, path = %tree_path.display(), "Saved rewards tree");

        if !self.is_member || self.already_submitted().await? {
            return Ok(());
        }
        self.publish_and_submit(&artifact, &tree_path, &tree_bytes).await
    }

    /// Generates the tree and stores its performance file, recording the performance CID in the header.
    async fn generate(&self) -> Result<RewardsArtifact> {
        let index = self.interval.index;
        if self.intervals_passed > 1 {
            warn!(
                index,
                intervals_passed = self.intervals_passed,
                "Multiple intervals have passed since the last rewards submission, rolling them into one"
            );
        }

        let request = GenerationRequest {
            network: self.config.rewards_params().network.clone(),
            index,
            intervals_passed: self.intervals_passed,
            start_time: self.interval.start_time,
            end_time: self.target.end_time,
            consensus_block: self.target.consensus_block,
            execution_block: self.target.execution_block,
        };
        info!(
            index,
            consensus_block = request.consensus_block,
            execution_block = request.execution_block,
            "Generating rewards tree"
        );
        let generated = self
            .config
            .rewards_generator()
            .generate(&request)
            .await
            .wrap_err_with(|| format!("Failed to generate rewards tree for interval {}", index))?;

        let storage = self.config.artifact_storage();
        let performance_bytes = storage.write_performance(index, &generated.minipool_performance_file).await?;

        let mut artifact = generated.rewards_file;
        artifact.header.minipool_performance_file_cid = if self.is_member {
            self.upload_compressed(&storage.performance_path(index), &performance_bytes).await?
        } else {
            UNPUBLISHED_PERFORMANCE_CID.to_string()
        };
        Ok(artifact)
    }

    async fn already_submitted(&self) -> Result<bool> {
        let index = self.interval.index;
        let submitted = SubmissionLedger::new(self.config.execution_client())
            .has_submitted(SubmissionPurpose::RewardsSnapshot, self.node_address, U256::from(index), None)
            .await
            .wrap_err("Failed to check rewards snapshot submission")?;
        if submitted {
            info!(index, "Rewards snapshot for this interval was already submitted");
            WATCHTOWER_METRICS.skipped_duplicate_submissions.add(1, &task_attributes(TASK_NAME));
        }
        Ok(submitted)
    }

    async fn publish_and_submit(&self, artifact: &RewardsArtifact, tree_path: &Path, tree_bytes: &[u8]) -> Result<()> {
        let index = self.interval.index;
        let tree_cid = self.upload_compressed(tree_path, tree_bytes).await?;

        let call = PreparedCall::SubmitRewardSnapshot(artifact.to_submission(tree_cid.clone()));
        let options = fee_options(self.config.fee_params(), U256::ZERO);
        let tx_hash = self
            .config
            .transaction_submitter()
            .submit(call, options)
            .await
            .wrap_err_with(|| format!("Failed to submit rewards snapshot for interval {}", index))?;

        WATCHTOWER_METRICS.submissions.add(1, &task_attributes(TASK_NAME));
        info!(index, tree_cid = %tree_cid, tx_hash = %tx_hash, "Submitted rewards snapshot");
        Ok(())
    }

    /// Compresses an artifact next to `path` and uploads it, returning its CID.
    async fn upload_compressed(&self, path: &Path, bytes: &[u8]) -> Result<String> {
        let compressed = self.config.artifact_storage().write_compressed(path, bytes).await?;
        let compressed_path = ArtifactStorage::compressed_path(path);
        let file_name = compressed_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| eyre!("Artifact path {} has no file name", compressed_path.display()))?;

        let cid = self.config.distribution_client().upload(file_name, compressed).await?;
        info!(file = file_name, cid = %cid, "Uploaded artifact");
        Ok(cid)
    }
}
