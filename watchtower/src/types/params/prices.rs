use alloy::primitives::Address;

use super::parse_address;
use crate::cli::prices::PriceCliArgs;
use crate::WatchtowerError;

#[derive(Debug, Clone, Default)]
pub struct PriceParams {
    pub twap_pool: Option<Address>,
}

impl TryFrom<PriceCliArgs> for PriceParams {
    type Error = WatchtowerError;
    fn try_from(args: PriceCliArgs) -> Result<Self, Self::Error> {
        let twap_pool = args.twap_pool_address.as_deref().map(|a| parse_address("TWAP pool address", a)).transpose()?;
        Ok(Self { twap_pool })
    }
}
