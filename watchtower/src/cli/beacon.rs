use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct BeaconCliArgs {
    /// The URL of the beacon node REST API.
    #[arg(env = "WATCHTOWER_BEACON_URL", long)]
    pub beacon_url: Url,
}
