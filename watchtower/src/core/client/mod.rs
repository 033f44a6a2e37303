pub mod distribution;
pub mod generator;

pub use distribution::DistributionClient;
pub use generator::RewardsGenerator;
