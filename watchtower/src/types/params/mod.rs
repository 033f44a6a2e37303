pub mod distribution;
pub mod ethereum;
pub mod fees;
pub mod otel;
pub mod prices;
pub mod relay;
pub mod rewards;
pub mod service;

pub use distribution::Web3StorageValidatedArgs;
pub use fees::FeeParams;
pub use otel::OTELConfig;
pub use prices::PriceParams;
pub use relay::RelayParams;
pub use rewards::RewardsParams;
pub use service::ServiceParams;

use crate::cli::RunCmd;
use crate::WatchtowerError;

/// Validated task parameters, everything [`crate::core::config::Config`] needs besides clients.
#[derive(Debug, Clone)]
pub struct WatchtowerParams {
    pub rewards: RewardsParams,
    pub fees: FeeParams,
    pub prices: PriceParams,
    pub relay: RelayParams,
    pub service: ServiceParams,
}

impl TryFrom<&RunCmd> for WatchtowerParams {
    type Error = WatchtowerError;
    fn try_from(run_cmd: &RunCmd) -> Result<Self, Self::Error> {
        Ok(Self {
            rewards: RewardsParams::from(run_cmd.rewards_args.clone()),
            fees: FeeParams::try_from(run_cmd.fee_args.clone())?,
            prices: PriceParams::try_from(run_cmd.price_args.clone())?,
            relay: RelayParams::try_from(run_cmd.relay_args.clone())?,
            service: ServiceParams::from(run_cmd.service_args.clone()),
        })
    }
}

/// Parses a hex address argument, naming the argument in the error.
pub(crate) fn parse_address(name: &str, value: &str) -> Result<alloy::primitives::Address, WatchtowerError> {
    value.parse().map_err(|e| WatchtowerError::ConfigError(format!("invalid {}: {}", name, e)))
}
