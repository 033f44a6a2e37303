use alloy::primitives::Address;

pub const NODE_ADDRESS: Address = Address::repeat_byte(0xaa);
pub const OTHER_MEMBER_ADDRESS: Address = Address::repeat_byte(0xbb);

pub const EL_BLOCK_NUMBER: u64 = 20_000;
pub const NETWORK: &str = "holesky";
pub const REWARD_INDEX: u64 = 5;

// Genesis 1000, 12 second slots, 32 slot epochs.
// The interval starts at slot 320 (epoch 10) and lasts 10 epochs.
pub const INTERVAL_START: u64 = 1_000 + 12 * 320;
pub const INTERVAL_DURATION: u64 = 12 * 32 * 10;

/// Head slot before the first interval boundary
pub const SLOT_BEFORE_INTERVAL_END: u64 = 600;
/// Head slot with exactly one interval elapsed
pub const SLOT_AFTER_ONE_INTERVAL: u64 = 700;
/// Head slot with two intervals elapsed
pub const SLOT_AFTER_TWO_INTERVALS: u64 = 1_100;

/// The first interval ends at slot 640, the snapshot is taken at the last slot of epoch 20
pub const FIRST_SNAPSHOT_SLOT: u64 = 671;
pub const FIRST_SNAPSHOT_EPOCH: u64 = 20;
/// Two intervals end at slot 960, the snapshot is taken at the last slot of epoch 30
pub const SECOND_SNAPSHOT_SLOT: u64 = 991;

/// Execution block number of a beacon block is its slot plus this offset
pub const SLOT_TO_BLOCK_OFFSET: u64 = 10_000;
