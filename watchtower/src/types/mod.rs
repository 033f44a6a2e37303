pub mod constant;
pub mod params;
pub mod rewards;

pub use rewards::{RewardsArtifact, RewardsFileHeader, RewardsTreeMode};
