pub mod relay_prices;
pub mod submit_prices;
pub mod submit_rewards;

use std::sync::Arc;

use alloy::primitives::U256;
use async_trait::async_trait;
use watchtower_chain_client_interface::{NetworkState, TxOptions};

use crate::core::config::Config;
use crate::types::params::FeeParams;

pub use relay_prices::RelayPricesTask;
pub use submit_prices::SubmitPricesTask;
pub use submit_rewards::SubmitRewardsTreeTask;

/// A unit of oracle duty, invoked by the controller once per new execution block.
#[async_trait]
pub trait WatchtowerTask: Send + Sync {
    fn name(&self) -> &'static str;

    /// Checks whether work is due and performs or schedules it.
    ///
    /// Returning `Ok` does not mean anything was submitted: most invocations are no-ops.
    async fn run(&self, config: Arc<Config>, state: Arc<NetworkState>) -> color_eyre::Result<()>;
}

/// Transaction options carrying the configured fee caps.
pub(crate) fn fee_options(fees: &FeeParams, value: U256) -> TxOptions {
    TxOptions {
        value,
        gas_limit: None,
        max_fee_per_gas: fees.max_fee_per_gas,
        max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
    }
}
