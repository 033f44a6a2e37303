use url::Url;

use crate::cli::distribution::DistributionCliArgs;

#[derive(Debug, Clone)]
pub struct Web3StorageValidatedArgs {
    pub api_url: Url,
    pub api_token: Option<String>,
}

impl From<DistributionCliArgs> for Web3StorageValidatedArgs {
    fn from(args: DistributionCliArgs) -> Self {
        Self { api_url: args.web3_storage_url, api_token: args.web3_storage_api_token }
    }
}
