use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use color_eyre::eyre::eyre;
use rstest::rstest;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use watchtower_chain_client_interface::{
    BeaconHead, MockBeaconClient, MockExecutionClient, NetworkState, PriceSettings, RewardInterval,
};

use crate::core::config::Config;
use crate::tests::common::constants::*;
use crate::tests::common::{member, rewards_dir, BEACON_CONFIG};
use crate::tests::config::TestConfigBuilder;
use crate::worker::tasks::WatchtowerTask;
use crate::worker::TaskController;

/// Task recording every block it was invoked for.
struct RecordingTask {
    name: &'static str,
    runs: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl WatchtowerTask for RecordingTask {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn run(&self, _config: Arc<Config>, _state: Arc<NetworkState>) -> color_eyre::Result<()> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(eyre!("{} failed", self.name));
        }
        Ok(())
    }
}

/// Chain whose latest block is read from `block`; a zero block makes the read fail.
fn chain(block: Arc<AtomicU64>) -> (MockExecutionClient, MockBeaconClient) {
    let mut beacon = MockBeaconClient::new();
    beacon.expect_get_eth2_config().returning(|| Ok(BEACON_CONFIG));
    beacon.expect_get_beacon_head().returning(|| Ok(BeaconHead { slot: 700, epoch: 21, finalized_epoch: 19 }));

    let mut execution = MockExecutionClient::new();
    execution.expect_latest_block_number().returning(move || match block.load(Ordering::SeqCst) {
        0 => Err(eyre!("execution client unavailable")),
        number => Ok(number),
    });
    execution.expect_reward_interval().returning(|_| {
        Ok(RewardInterval { index: REWARD_INDEX, start_time: INTERVAL_START, duration: INTERVAL_DURATION })
    });
    execution.expect_price_settings().returning(|_| Ok(PriceSettings::default()));
    execution.expect_oracle_members().returning(|_| Ok(vec![member(NODE_ADDRESS)]));
    (execution, beacon)
}

fn controller(rewards_dir: &TempDir, block: Arc<AtomicU64>, runs: Arc<AtomicUsize>) -> TaskController {
    let (execution, beacon) = chain(block);
    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_execution_client(execution)
        .configure_beacon_client(beacon)
        .build();
    let tasks: Vec<Box<dyn WatchtowerTask>> = vec![
        Box::new(RecordingTask { name: "failing", runs: runs.clone(), fail: true }),
        Box::new(RecordingTask { name: "succeeding", runs, fail: false }),
    ];
    TaskController::with_tasks(config, CancellationToken::new(), tasks)
}

#[rstest]
#[tokio::test]
async fn tasks_run_once_per_new_block(rewards_dir: TempDir) {
    let block = Arc::new(AtomicU64::new(100));
    let runs = Arc::new(AtomicUsize::new(0));
    let mut controller = controller(&rewards_dir, block.clone(), runs.clone());

    controller.tick().await;
    // a failing task does not stop the next one
    assert_eq!(runs.load(Ordering::SeqCst), 2);

    controller.tick().await;
    assert_eq!(runs.load(Ordering::SeqCst), 2);

    block.store(101, Ordering::SeqCst);
    controller.tick().await;
    assert_eq!(runs.load(Ordering::SeqCst), 4);
}

#[rstest]
#[tokio::test]
async fn state_read_failure_skips_the_tick(rewards_dir: TempDir) {
    let block = Arc::new(AtomicU64::new(0));
    let runs = Arc::new(AtomicUsize::new(0));
    let mut controller = controller(&rewards_dir, block.clone(), runs.clone());

    controller.tick().await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    block.store(100, Ordering::SeqCst);
    controller.tick().await;
    assert_eq!(runs.load(Ordering::SeqCst), 2);
}

#[rstest]
#[tokio::test]
async fn run_stops_on_cancellation(rewards_dir: TempDir) {
    let (execution, beacon) = chain(Arc::new(AtomicU64::new(100)));
    let config = TestConfigBuilder::new(rewards_dir.path())
        .configure_execution_client(execution)
        .configure_beacon_client(beacon)
        .build();
    let token = CancellationToken::new();
    let controller = TaskController::with_tasks(config, token.clone(), Vec::new());

    let handle = tokio::spawn(controller.run());
    token.cancel();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("controller should stop after cancellation")
        .unwrap();
}
