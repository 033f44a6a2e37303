use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct FeeCliArgs {
    /// Max fee per gas in gwei. Estimated by the provider when not set.
    #[arg(env = "WATCHTOWER_MAX_FEE_GWEI", long)]
    pub max_fee_gwei: Option<f64>,

    /// Max priority fee per gas in gwei.
    #[arg(env = "WATCHTOWER_MAX_PRIORITY_FEE_GWEI", long)]
    pub max_priority_fee_gwei: Option<f64>,
}
