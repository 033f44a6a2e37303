use std::path::PathBuf;

use url::Url;

use crate::cli::rewards::RewardsCliArgs;
use crate::types::RewardsTreeMode;

#[derive(Debug, Clone)]
pub struct RewardsParams {
    pub network: String,
    pub rewards_dir: PathBuf,
    pub tree_mode: RewardsTreeMode,
    pub generator_url: Url,
}

impl From<RewardsCliArgs> for RewardsParams {
    fn from(args: RewardsCliArgs) -> Self {
        Self {
            network: args.network,
            rewards_dir: args.rewards_dir,
            tree_mode: args.rewards_tree_mode,
            generator_url: args.rewards_generator_url,
        }
    }
}
