use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use thiserror::Error;
use tracing::{debug, error, info};
use watchtower_chain_client_interface::{NetworkState, PreparedCall, RelayCallParams, RelayTarget, TxOptions};

use super::{fee_options, WatchtowerTask};
use crate::core::config::Config;
use crate::types::constant::BLOCKS_PER_TURN;
use crate::utils::metrics::{task_attributes, WATCHTOWER_METRICS};
use crate::worker::relay_fees::{arbitrum_params, zksync_era_params};
use crate::worker::rotation::{is_my_turn, member_index};

const TASK_NAME: &str = "relay_prices";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to relay prices to {}", format_failures(.failures))]
    Partial { failures: Vec<(RelayTarget, String)> },

    #[error("Rate check returned {actual} staleness flags for {expected} messengers")]
    FlagCountMismatch { expected: usize, actual: usize },
}

fn format_failures(failures: &[(RelayTarget, String)]) -> String {
    failures.iter().map(|(target, reason)| format!("{} ({})", target, reason)).collect::<Vec<_>>().join(", ")
}

/// Pushes the network price to every L2 messenger whose relayed rate went stale.
///
/// Oracle members take turns of [`BLOCKS_PER_TURN`] blocks so only one of them pays for a relay.
#[derive(Default)]
pub struct RelayPricesTask;

impl RelayPricesTask {
    pub fn new() -> Self {
        Self
    }

    async fn relay(&self, config: &Config, target: RelayTarget, messenger: Address) -> Result<()> {
        let (params, options) = match target {
            RelayTarget::Optimism | RelayTarget::Polygon | RelayTarget::Base => {
                (RelayCallParams::Plain, fee_options(config.fee_params(), U256::ZERO))
            }
            RelayTarget::Arbitrum => {
                let max_fee = self.suggested_max_fee_per_gas(config).await?;
                let (params, value) = arbitrum_params(max_fee);
                (params, fee_options(config.fee_params(), value))
            }
            RelayTarget::ZkSyncEra => {
                let max_fee = self.configured_max_fee_per_gas(config).await?;
                let (params, value) = zksync_era_params(max_fee);
                (params, fee_options(config.fee_params(), value))
            }
        };
        debug!(target = %target, value = %options.value, "Relaying prices");
        self.submit(config, target, messenger, params, options).await
    }

    /// The client's fee suggestion. Arbitrum submission costs are always priced from it.
    async fn suggested_max_fee_per_gas(&self, config: &Config) -> Result<u128> {
        config.execution_client().suggested_max_fee_per_gas().await.wrap_err("Failed to estimate max fee")
    }

    /// Configured max fee, or the client's suggestion when none is configured.
    async fn configured_max_fee_per_gas(&self, config: &Config) -> Result<u128> {
        match config.fee_params().max_fee_per_gas {
            Some(max_fee) => Ok(max_fee),
            None => self.suggested_max_fee_per_gas(config).await,
        }
    }

    async fn submit(
        &self,
        config: &Config,
        target: RelayTarget,
        messenger: Address,
        params: RelayCallParams,
        options: TxOptions,
    ) -> Result<()> {
        let tx_hash =
            config.transaction_submitter().submit(PreparedCall::SubmitRate { target, messenger, params }, options).await?;
        WATCHTOWER_METRICS.submissions.add(1, &task_attributes(TASK_NAME));
        info!(target = %target, tx_hash = %tx_hash, "Relayed prices");
        Ok(())
    }
}

#[async_trait]
impl WatchtowerTask for RelayPricesTask {
    fn name(&self) -> &'static str {
        TASK_NAME
    }

    async fn run(&self, config: Arc<Config>, state: Arc<NetworkState>) -> Result<()> {
        let messengers = config.relay_params().messengers.clone();
        if messengers.is_empty() {
            debug!("No price messengers configured, returning safely.");
            return Ok(());
        }

        let flags = config
            .execution_client()
            .rates_stale(messengers.clone(), state.el_block_number)
            .await
            .wrap_err("Failed to check messenger rates")?;
        if flags.len() != messengers.len() {
            return Err(RelayError::FlagCountMismatch { expected: messengers.len(), actual: flags.len() }.into());
        }
        let stale: Vec<(RelayTarget, Address)> =
            messengers.into_iter().zip(flags).filter_map(|(messenger, is_stale)| is_stale.then_some(messenger)).collect();
        if stale.is_empty() {
            debug!("All relayed rates are current, returning safely.");
            return Ok(());
        }

        let Some(self_index) = member_index(&state.oracle_members, config.node_address()) else {
            debug!("Node is not an oracle member, returning safely.");
            return Ok(());
        };
        let member_count = state.oracle_members.len() as u64;
        if !is_my_turn(self_index, state.el_block_number, BLOCKS_PER_TURN, member_count) {
            debug!(block = state.el_block_number, self_index, "Not this node's turn to relay, returning safely.");
            return Ok(());
        }

        info!(targets = stale.len(), "Relaying stale prices");
        let mut failures = Vec::new();
        for (target, messenger) in stale {
            if let Err(e) = self.relay(&config, target, messenger).await {
                error!(target = %target, error = %e, error_chain = ?e, "Failed to relay prices");
                failures.push((target, e.to_string()));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(RelayError::Partial { failures }.into())
        }
    }
}
