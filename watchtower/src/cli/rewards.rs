use std::path::PathBuf;

use clap::Args;
use url::Url;

use crate::types::RewardsTreeMode;

#[derive(Debug, Clone, Args)]
pub struct RewardsCliArgs {
    /// Network name used in artifact file names.
    #[arg(env = "WATCHTOWER_NETWORK", long, default_value = "mainnet")]
    pub network: String,

    /// Directory holding rewards trees and performance files.
    #[arg(env = "WATCHTOWER_REWARDS_DIR", long, default_value = "rewards")]
    pub rewards_dir: PathBuf,

    /// Whether a node outside the oracle set generates trees itself.
    #[arg(env = "WATCHTOWER_REWARDS_TREE_MODE", long, value_enum, default_value_t = RewardsTreeMode::Download)]
    pub rewards_tree_mode: RewardsTreeMode,

    /// The URL of the rewards tree generator service.
    #[arg(env = "WATCHTOWER_REWARDS_GENERATOR_URL", long)]
    pub rewards_generator_url: Url,
}
