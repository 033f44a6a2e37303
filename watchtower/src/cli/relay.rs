use clap::Args;

/// Messenger contracts of the chains prices are relayed to. A chain without a messenger is skipped.
#[derive(Debug, Clone, Args)]
pub struct RelayCliArgs {
    #[arg(env = "WATCHTOWER_OPTIMISM_MESSENGER_ADDRESS", long)]
    pub optimism_messenger_address: Option<String>,

    #[arg(env = "WATCHTOWER_POLYGON_MESSENGER_ADDRESS", long)]
    pub polygon_messenger_address: Option<String>,

    #[arg(env = "WATCHTOWER_ARBITRUM_MESSENGER_ADDRESS", long)]
    pub arbitrum_messenger_address: Option<String>,

    #[arg(env = "WATCHTOWER_ZKSYNC_ERA_MESSENGER_ADDRESS", long)]
    pub zksync_era_messenger_address: Option<String>,

    /// Base is an OP stack chain and uses the Optimism messenger interface.
    #[arg(env = "WATCHTOWER_BASE_MESSENGER_ADDRESS", long)]
    pub base_messenger_address: Option<String>,
}
