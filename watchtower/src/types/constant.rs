/// File name prefix of the rewards tree artifact.
pub const REWARDS_TREE_FILE_PREFIX: &str = "rp-rewards";

/// File name prefix of the minipool performance artifact.
pub const PERFORMANCE_FILE_PREFIX: &str = "rp-minipool-performance";

/// Extension appended to compressed artifacts.
pub const COMPRESSED_FILE_EXTENSION: &str = "zst";

/// zstd level used for distributed artifacts.
pub const COMPRESSION_LEVEL: i32 = 19;

/// Performance file CID recorded by nodes that never upload it.
pub const UNPUBLISHED_PERFORMANCE_CID: &str = "---";

/// Consecutive execution blocks assigned to one oracle member for relays.
pub const BLOCKS_PER_TURN: u64 = 75;

/// Look-back window of the price TWAP, 12 hours.
pub const TWAP_WINDOW_SECONDS: u32 = 60 * 60 * 12;

/// Storage tag of reward snapshot submissions.
pub const REWARDS_SNAPSHOT_SUBMISSION_TAG: &str = "rewards.snapshot.submitted.node";

/// Storage tag of price submissions.
pub const PRICES_SUBMISSION_TAG: &str = "network.prices.submitted.node.key";
