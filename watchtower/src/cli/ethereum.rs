use clap::Args;
use url::Url;

#[derive(Debug, Clone, Args)]
pub struct EthereumCliArgs {
    /// The URL of the execution layer RPC node.
    #[arg(env = "WATCHTOWER_ETHEREUM_RPC_URL", long)]
    pub ethereum_rpc_url: Url,

    /// The private key of the node wallet.
    #[arg(env = "WATCHTOWER_ETHEREUM_PRIVATE_KEY", long, hide_env_values = true)]
    pub ethereum_private_key: String,

    /// The address of the protocol storage contract.
    #[arg(env = "WATCHTOWER_STORAGE_CONTRACT_ADDRESS", long)]
    pub storage_contract_address: String,
}
