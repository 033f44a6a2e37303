use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct PriceCliArgs {
    /// The address of the Uniswap V3 pool the price TWAP is read from.
    #[arg(env = "WATCHTOWER_TWAP_POOL_ADDRESS", long)]
    pub twap_pool_address: Option<String>,
}
