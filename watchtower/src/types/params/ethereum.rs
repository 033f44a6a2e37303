use watchtower_ethereum_client::EthereumValidatedArgs;

use super::parse_address;
use crate::cli::ethereum::EthereumCliArgs;
use crate::WatchtowerError;

impl TryFrom<EthereumCliArgs> for EthereumValidatedArgs {
    type Error = WatchtowerError;
    fn try_from(args: EthereumCliArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            rpc_url: args.ethereum_rpc_url,
            private_key: args.ethereum_private_key,
            storage_address: parse_address("storage contract address", &args.storage_contract_address)?,
        })
    }
}
