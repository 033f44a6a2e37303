use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct DistributionCliArgs {
    /// The URL of the Web3.Storage upload API.
    #[arg(env = "WATCHTOWER_WEB3_STORAGE_URL", long, default_value = "https://api.web3.storage")]
    pub web3_storage_url: Url,

    /// The Web3.Storage API token. Oracle members need one to publish artifacts.
    #[arg(env = "WATCHTOWER_WEB3_STORAGE_API_TOKEN", long, hide_env_values = true)]
    pub web3_storage_api_token: Option<String>,
}
