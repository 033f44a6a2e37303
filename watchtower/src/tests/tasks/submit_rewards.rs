use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{B256, U256};
use async_trait::async_trait;
use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;
use tokio::sync::Notify;
use watchtower_chain_client_interface::{
    MockBeaconClient, MockExecutionClient, NetworkState, PreparedCall, RewardSnapshotSubmission,
};

use crate::core::artifacts::ArtifactStorage;
use crate::core::client::distribution::MockDistributionClient;
use crate::core::client::generator::{GeneratedRewards, GenerationRequest, GeneratorError, MockRewardsGenerator};
use crate::core::client::RewardsGenerator;
use crate::tests::common::constants::*;
use crate::tests::common::{beacon_with_finality, counting_submitter, member, network_state, rewards_dir, submitter};
use crate::tests::config::TestConfigBuilder;
use crate::types::constant::UNPUBLISHED_PERFORMANCE_CID;
use crate::types::rewards::tests::sample_artifact;
use crate::types::RewardsTreeMode;
use crate::worker::tasks::SubmitRewardsTreeTask;

fn generated(request: &GenerationRequest) -> GeneratedRewards {
    GeneratedRewards {
        rewards_file: sample_artifact(request.index, request.intervals_passed),
        minipool_performance_file: json!({ "index": request.index, "minipools": {} }),
    }
}

fn generator(times: usize) -> MockRewardsGenerator {
    let mut generator = MockRewardsGenerator::new();
    generator.expect_generate().times(times).returning(|request| Ok(generated(request)));
    generator
}

/// Execution client whose submission ledger answers `submitted` for every key.
fn ledger(submitted: bool) -> MockExecutionClient {
    let mut execution = MockExecutionClient::new();
    execution.expect_storage_bool().returning(move |_, _| Ok(submitted));
    execution
}

/// Distribution client answering `cid-<file name>`.
fn distribution(times: usize) -> MockDistributionClient {
    let mut distribution = MockDistributionClient::new();
    distribution.expect_upload().times(times).returning(|file_name, _| Ok(format!("cid-{}", file_name)));
    distribution
}

/// Distribution client that accepts every upload and counts them.
fn counting_distribution() -> (MockDistributionClient, Arc<AtomicUsize>) {
    let uploads = Arc::new(AtomicUsize::new(0));
    let counter = uploads.clone();
    let mut distribution = MockDistributionClient::new();
    distribution.expect_upload().returning(move |file_name, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("cid-{}", file_name))
    });
    (distribution, uploads)
}

fn tree_cid() -> String {
    format!("cid-rp-rewards-{}-{}.json.zst", NETWORK, REWARD_INDEX)
}

fn performance_cid() -> String {
    format!("cid-rp-minipool-performance-{}-{}.json.zst", NETWORK, REWARD_INDEX)
}

fn closed_interval(mut state: NetworkState, head_slot: u64) -> Arc<NetworkState> {
    state.beacon_slot_number = head_slot;
    Arc::new(state)
}

fn is_snapshot(call: &PreparedCall, check: impl Fn(&RewardSnapshotSubmission) -> bool) -> bool {
    matches!(call, PreparedCall::SubmitRewardSnapshot(submission) if check(submission))
}

#[rstest]
#[tokio::test]
async fn open_interval_is_a_no_op(network_state: NetworkState, rewards_dir: TempDir) {
    let config = TestConfigBuilder::new(rewards_dir.path()).build();
    let task = SubmitRewardsTreeTask::new();

    let handle = task.launch(config, Arc::new(network_state)).await.unwrap();

    assert!(handle.is_none());
}

#[rstest]
#[tokio::test]
async fn non_member_in_download_mode_is_a_no_op(network_state: NetworkState, rewards_dir: TempDir) {
    let mut state = network_state;
    state.oracle_members = vec![member(OTHER_MEMBER_ADDRESS)];
    let config = TestConfigBuilder::new(rewards_dir.path()).build();

    let handle =
        SubmitRewardsTreeTask::new().launch(config, closed_interval(state, SLOT_AFTER_ONE_INTERVAL)).await.unwrap();

    assert!(handle.is_none());
}

#[rstest]
#[tokio::test]
async fn waits_for_snapshot_epoch_finality(network_state: NetworkState, rewards_dir: TempDir) {
    let mut beacon = MockBeaconClient::new();
    beacon.expect_get_beacon_head().times(1).returning(|| {
        Ok(watchtower_chain_client_interface::BeaconHead {
            slot: SLOT_AFTER_ONE_INTERVAL,
            epoch: 21,
            finalized_epoch: FIRST_SNAPSHOT_EPOCH,
        })
    });
    beacon.expect_get_beacon_block().never();
    let config = TestConfigBuilder::new(rewards_dir.path()).configure_beacon_client(beacon).build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config.clone(), closed_interval(network_state, SLOT_AFTER_ONE_INTERVAL))
        .await
        .unwrap();

    assert!(handle.is_none());
    assert!(!config.artifact_storage().rewards_tree_path(REWARD_INDEX).exists());
}

#[rstest]
#[tokio::test]
async fn member_generates_publishes_and_submits(network_state: NetworkState, rewards_dir: TempDir) {
    let mut submitter = submitter();
    submitter
        .expect_submit()
        .withf(|call, options| {
            options.value == U256::ZERO
                && is_snapshot(call, |submission| {
                    submission.reward_index == U256::from(REWARD_INDEX)
                        && submission.intervals_passed == U256::from(1u64)
                        && submission.merkle_tree_cid == tree_cid()
                })
        })
        .times(1)
        .returning(|_, _| Ok(B256::repeat_byte(0x01)));

    let mut generator = MockRewardsGenerator::new();
    generator
        .expect_generate()
        .withf(|request| {
            request.index == REWARD_INDEX
                && request.intervals_passed == 1
                && request.start_time == INTERVAL_START
                && request.end_time == INTERVAL_START + INTERVAL_DURATION
                && request.consensus_block == FIRST_SNAPSHOT_SLOT
                && request.execution_block == FIRST_SNAPSHOT_SLOT + SLOT_TO_BLOCK_OFFSET
        })
        .times(1)
        .returning(|request| Ok(generated(request)));

    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(false))
        .configure_distribution_client(distribution(2))
        .configure_rewards_generator(generator)
        .configure_transaction_submitter(submitter)
        .build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config.clone(), closed_interval(network_state, SLOT_AFTER_ONE_INTERVAL))
        .await
        .unwrap()
        .expect("background execution should start");
    handle.await.unwrap();

    let stored = config.artifact_storage().read_rewards_tree(REWARD_INDEX).await.unwrap();
    assert_eq!(stored.header.minipool_performance_file_cid, performance_cid());
    assert_eq!(stored.header.intervals_passed, 1);

    let tree_path = config.artifact_storage().rewards_tree_path(REWARD_INDEX);
    assert!(ArtifactStorage::compressed_path(&tree_path).exists());
    assert!(config.artifact_storage().performance_path(REWARD_INDEX).exists());
}

#[rstest]
#[tokio::test]
async fn observer_generates_without_publishing(network_state: NetworkState, rewards_dir: TempDir) {
    let mut state = network_state;
    state.oracle_members = vec![member(OTHER_MEMBER_ADDRESS)];

    let config = TestConfigBuilder::new(rewards_dir.path())
        .tree_mode(RewardsTreeMode::Generate)
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_rewards_generator(generator(1))
        .build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config.clone(), closed_interval(state, SLOT_AFTER_ONE_INTERVAL))
        .await
        .unwrap()
        .expect("background execution should start");
    handle.await.unwrap();

    let stored = config.artifact_storage().read_rewards_tree(REWARD_INDEX).await.unwrap();
    assert_eq!(stored.header.minipool_performance_file_cid, UNPUBLISHED_PERFORMANCE_CID);
    let tree_path = config.artifact_storage().rewards_tree_path(REWARD_INDEX);
    assert!(!ArtifactStorage::compressed_path(&tree_path).exists());
}

#[rstest]
#[tokio::test]
async fn valid_cache_already_submitted_does_nothing(network_state: NetworkState, rewards_dir: TempDir) {
    let storage = ArtifactStorage::new(rewards_dir.path(), NETWORK);
    storage.write_rewards_tree(&sample_artifact(REWARD_INDEX, 1)).await.unwrap();

    let (submitter, submissions) = counting_submitter();
    let (distribution, uploads) = counting_distribution();
    // the generator has no expectations
    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(true))
        .configure_distribution_client(distribution)
        .configure_transaction_submitter(submitter)
        .build();

    let task = SubmitRewardsTreeTask::new();
    for _ in 0..2 {
        let handle = task
            .launch(config.clone(), closed_interval(network_state.clone(), SLOT_AFTER_ONE_INTERVAL))
            .await
            .unwrap()
            .expect("background execution should start");
        handle.await.unwrap();
    }

    assert_eq!(submissions.load(Ordering::SeqCst), 0);
    assert_eq!(uploads.load(Ordering::SeqCst), 0);
    let tree_path = config.artifact_storage().rewards_tree_path(REWARD_INDEX);
    assert!(!ArtifactStorage::compressed_path(&tree_path).exists());
}

#[rstest]
#[tokio::test]
async fn valid_cache_is_published_and_submitted(network_state: NetworkState, rewards_dir: TempDir) {
    let storage = ArtifactStorage::new(rewards_dir.path(), NETWORK);
    storage.write_rewards_tree(&sample_artifact(REWARD_INDEX, 1)).await.unwrap();

    let mut submitter = submitter();
    submitter
        .expect_submit()
        .withf(|call, _| is_snapshot(call, |submission| submission.merkle_tree_cid == tree_cid()))
        .times(1)
        .returning(|_, _| Ok(B256::repeat_byte(0x02)));

    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(false))
        .configure_distribution_client(distribution(1))
        .configure_transaction_submitter(submitter)
        .build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config, closed_interval(network_state, SLOT_AFTER_ONE_INTERVAL))
        .await
        .unwrap()
        .expect("background execution should start");
    handle.await.unwrap();
}

#[rstest]
#[tokio::test]
async fn stale_cache_is_regenerated(network_state: NetworkState, rewards_dir: TempDir) {
    let storage = ArtifactStorage::new(rewards_dir.path(), NETWORK);
    storage.write_rewards_tree(&sample_artifact(REWARD_INDEX, 1)).await.unwrap();

    let mut generator = MockRewardsGenerator::new();
    generator
        .expect_generate()
        .withf(|request| request.intervals_passed == 2 && request.consensus_block == SECOND_SNAPSHOT_SLOT)
        .times(1)
        .returning(|request| Ok(generated(request)));

    let mut submitter = submitter();
    submitter
        .expect_submit()
        .withf(|call, _| is_snapshot(call, |submission| submission.intervals_passed == U256::from(2u64)))
        .times(1)
        .returning(|_, _| Ok(B256::repeat_byte(0x03)));

    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(40))
        .configure_execution_client(ledger(false))
        .configure_distribution_client(distribution(2))
        .configure_rewards_generator(generator)
        .configure_transaction_submitter(submitter)
        .build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config.clone(), closed_interval(network_state, SLOT_AFTER_TWO_INTERVALS))
        .await
        .unwrap()
        .expect("background execution should start");
    handle.await.unwrap();

    let stored = config.artifact_storage().read_rewards_tree(REWARD_INDEX).await.unwrap();
    assert_eq!(stored.header.intervals_passed, 2);
}

#[rstest]
#[tokio::test]
async fn regenerated_tree_is_not_resubmitted(network_state: NetworkState, rewards_dir: TempDir) {
    let (submitter, submissions) = counting_submitter();
    let (distribution, uploads) = counting_distribution();
    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(true))
        .configure_distribution_client(distribution)
        .configure_rewards_generator(generator(1))
        .configure_transaction_submitter(submitter)
        .build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config.clone(), closed_interval(network_state, SLOT_AFTER_ONE_INTERVAL))
        .await
        .unwrap()
        .expect("background execution should start");
    handle.await.unwrap();

    assert_eq!(submissions.load(Ordering::SeqCst), 0);
    // only the performance file is uploaded before the ledger check
    assert_eq!(uploads.load(Ordering::SeqCst), 1);
    let tree_path = config.artifact_storage().rewards_tree_path(REWARD_INDEX);
    assert!(tree_path.exists());
    assert!(!ArtifactStorage::compressed_path(&tree_path).exists());
}

#[rstest]
#[tokio::test]
async fn corrupt_cache_is_regenerated_and_submitted(network_state: NetworkState, rewards_dir: TempDir) {
    let storage = ArtifactStorage::new(rewards_dir.path(), NETWORK);
    storage.write_rewards_tree(&sample_artifact(REWARD_INDEX, 1)).await.unwrap();
    let tree_path = storage.rewards_tree_path(REWARD_INDEX);
    let mut json: serde_json::Value = serde_json::from_slice(&std::fs::read(&tree_path).unwrap()).unwrap();
    json["nodeRewards"] = json!("corrupted");
    std::fs::write(&tree_path, serde_json::to_vec(&json).unwrap()).unwrap();

    let (submitter, submissions) = counting_submitter();
    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(false))
        .configure_distribution_client(distribution(2))
        .configure_rewards_generator(generator(1))
        .configure_transaction_submitter(submitter)
        .build();

    let handle = SubmitRewardsTreeTask::new()
        .launch(config.clone(), closed_interval(network_state, SLOT_AFTER_ONE_INTERVAL))
        .await
        .unwrap()
        .expect("background execution should start");
    handle.await.unwrap();

    assert_eq!(submissions.load(Ordering::SeqCst), 1);
    let stored = config.artifact_storage().read_rewards_tree(REWARD_INDEX).await.unwrap();
    assert_eq!(stored.header.minipool_performance_file_cid, performance_cid());
}

#[rstest]
#[tokio::test]
async fn failed_upload_leaves_task_ready_for_next_tick(network_state: NetworkState, rewards_dir: TempDir) {
    let mut distribution = MockDistributionClient::new();
    distribution.expect_upload().times(2).returning(|file_name, _| {
        Err(crate::core::client::distribution::DistributionError::NetworkError {
            file_name: file_name.to_string(),
            message: "connection reset".to_string(),
        })
    });

    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(false))
        .configure_distribution_client(distribution)
        .configure_rewards_generator(generator(2))
        .build();

    let task = SubmitRewardsTreeTask::new();
    for _ in 0..2 {
        let handle = task
            .launch(config.clone(), closed_interval(network_state.clone(), SLOT_AFTER_ONE_INTERVAL))
            .await
            .unwrap()
            .expect("a failed execution must not block the next one");
        handle.await.unwrap();
    }
}

/// Generator that blocks until released and counts its invocations.
struct GatedGenerator {
    calls: AtomicUsize,
    release: Notify,
}

#[async_trait]
impl RewardsGenerator for GatedGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedRewards, GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(generated(request))
    }
}

#[async_trait]
impl RewardsGenerator for Arc<GatedGenerator> {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedRewards, GeneratorError> {
        self.as_ref().generate(request).await
    }
}

#[rstest]
#[tokio::test]
async fn concurrent_invocations_generate_once(network_state: NetworkState, rewards_dir: TempDir) {
    let generator = Arc::new(GatedGenerator { calls: AtomicUsize::new(0), release: Notify::new() });

    let mut submitter = submitter();
    submitter.expect_submit().times(1).returning(|_, _| Ok(B256::repeat_byte(0x04)));

    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_beacon_client(beacon_with_finality(FIRST_SNAPSHOT_EPOCH + 1))
        .configure_execution_client(ledger(false))
        .configure_distribution_client(distribution(2))
        .configure_rewards_generator(generator.clone())
        .configure_transaction_submitter(submitter)
        .build();

    let task = SubmitRewardsTreeTask::new();
    let state = closed_interval(network_state, SLOT_AFTER_ONE_INTERVAL);
    let (first, second) =
        tokio::join!(task.launch(config.clone(), state.clone()), task.launch(config.clone(), state.clone()));
    let handles: Vec<_> = [first.unwrap(), second.unwrap()].into_iter().flatten().collect();
    assert_eq!(handles.len(), 1, "exactly one background execution must start");

    // a third trigger while the first still runs is rejected too
    assert!(task.launch(config.clone(), state).await.unwrap().is_none());

    generator.release.notify_one();
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}
