use clap::Args;

fn parse_positive_u64(s: &str) -> Result<u64, String> {
    let value: u64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Args)]
pub struct ServiceCliArgs {
    /// Seconds between two reads of the chain state.
    #[arg(env = "WATCHTOWER_POLL_INTERVAL_SECONDS", long, default_value = "12", value_parser = parse_positive_u64)]
    pub poll_interval_seconds: u64,

    /// How many empty slots to walk back from a snapshot slot. Defaults to one epoch.
    #[arg(env = "WATCHTOWER_MAX_SNAPSHOT_WALKBACK", long)]
    pub max_snapshot_walkback: Option<u64>,

    /// Seconds to wait for running tasks on shutdown.
    #[arg(env = "WATCHTOWER_SHUTDOWN_TIMEOUT_SECONDS", long, default_value = "60")]
    pub shutdown_timeout_seconds: u64,
}
