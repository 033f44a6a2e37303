use crate::cli::fees::FeeCliArgs;
use crate::WatchtowerError;

const WEI_PER_GWEI: f64 = 1e9;

/// Fee caps applied to every transaction, in wei.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeParams {
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

pub fn gwei_to_wei(name: &str, gwei: f64) -> Result<u128, WatchtowerError> {
    if !gwei.is_finite() || gwei < 0.0 {
        return Err(WatchtowerError::ConfigError(format!("{} must be a non negative number, got {}", name, gwei)));
    }
    Ok((gwei * WEI_PER_GWEI).round() as u128)
}

impl TryFrom<FeeCliArgs> for FeeParams {
    type Error = WatchtowerError;
    fn try_from(args: FeeCliArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            max_fee_per_gas: args.max_fee_gwei.map(|fee| gwei_to_wei("max fee", fee)).transpose()?,
            max_priority_fee_per_gas: args
                .max_priority_fee_gwei
                .map(|fee| gwei_to_wei("max priority fee", fee))
                .transpose()?,
        })
    }
}
