pub mod constants;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::{Address, B256};
use rstest::fixture;
use tempfile::TempDir;
use watchtower_chain_client_interface::{
    BeaconBlock, BeaconConfig, BeaconHead, MockBeaconClient, MockTransactionSubmitter, NetworkState, OracleMember,
    PriceSettings, RewardInterval,
};

use constants::*;

pub const BEACON_CONFIG: BeaconConfig = BeaconConfig { genesis_time: 1_000, seconds_per_slot: 12, slots_per_epoch: 32 };

/// Network state in which the node is the only oracle member and nothing is due.
#[fixture]
pub fn network_state() -> NetworkState {
    NetworkState {
        el_block_number: EL_BLOCK_NUMBER,
        beacon_slot_number: SLOT_BEFORE_INTERVAL_END,
        beacon_config: BEACON_CONFIG,
        reward_interval: RewardInterval {
            index: REWARD_INDEX,
            start_time: INTERVAL_START,
            duration: INTERVAL_DURATION,
        },
        price_settings: PriceSettings::default(),
        oracle_members: vec![member(NODE_ADDRESS)],
    }
}

#[fixture]
pub fn rewards_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary rewards directory")
}

pub fn member(address: Address) -> OracleMember {
    OracleMember { address, joined_time: 1 }
}

/// Submitter that only knows its own address.
pub fn submitter() -> MockTransactionSubmitter {
    let mut submitter = MockTransactionSubmitter::new();
    submitter.expect_node_address().return_const(NODE_ADDRESS);
    submitter
}

/// Submitter that accepts every transaction and counts them.
///
/// Background executions swallow mock panics, so tests asserting that nothing was submitted
/// read the counter instead of relying on `never()`.
pub fn counting_submitter() -> (MockTransactionSubmitter, Arc<AtomicUsize>) {
    let submissions = Arc::new(AtomicUsize::new(0));
    let counter = submissions.clone();
    let mut submitter = submitter();
    submitter.expect_submit().returning(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(B256::ZERO)
    });
    (submitter, submissions)
}

/// Beacon client whose head has finalized `finalized_epoch` and whose every slot holds a block.
pub fn beacon_with_finality(finalized_epoch: u64) -> MockBeaconClient {
    let mut beacon = MockBeaconClient::new();
    beacon.expect_get_beacon_head().returning(move || {
        Ok(BeaconHead { slot: finalized_epoch * 32 + 64, epoch: finalized_epoch + 2, finalized_epoch })
    });
    beacon
        .expect_get_beacon_block()
        .returning(|slot| Ok(Some(BeaconBlock { slot, execution_block_number: slot + SLOT_TO_BLOCK_OFFSET })));
    beacon
}
