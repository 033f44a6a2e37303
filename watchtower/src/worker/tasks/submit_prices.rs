use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use watchtower_chain_client_interface::{BeaconConfig, NetworkState, PreparedCall};

use super::{fee_options, WatchtowerTask};
use crate::core::config::Config;
use crate::types::constant::TWAP_WINDOW_SECONDS;
use crate::utils::metrics::{task_attributes, WATCHTOWER_METRICS};
use crate::worker::ledger::{SubmissionLedger, SubmissionPurpose};
use crate::worker::single_flight::SingleFlight;
use crate::worker::twap::{average_tick, tick_to_price};

const TASK_NAME: &str = "submit_prices";

/// Reports the RPL price, observed as a TWAP, for the latest reportable block.
pub struct SubmitPricesTask {
    flight: SingleFlight,
}

impl Default for SubmitPricesTask {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitPricesTask {
    pub fn new() -> Self {
        Self { flight: SingleFlight::new(TASK_NAME) }
    }

    pub(crate) async fn launch(&self, config: Arc<Config>, state: Arc<NetworkState>) -> Result<Option<JoinHandle<()>>> {
        let settings = state.price_settings;
        if !settings.submit_prices_enabled {
            debug!("Price submission is disabled, returning safely.");
            return Ok(None);
        }
        let node_address = config.node_address();
        if !state.is_oracle_member(node_address) {
            debug!("Node is not an oracle member, returning safely.");
            return Ok(None);
        }

        let block_number = settings.latest_reportable_block;
        if block_number <= settings.prices_block {
            debug!(block_number, prices_block = settings.prices_block, "Prices are up to date, returning safely.");
            return Ok(None);
        }

        let header = config
            .execution_client()
            .header_by_number(block_number)
            .await
            .wrap_err_with(|| format!("Failed to get header of block {}", block_number))?;
        let epoch = epoch_at(header.timestamp, &state.beacon_config)?;
        let head = config.beacon_client().get_beacon_head().await.wrap_err("Failed to get beacon head")?;
        if epoch > head.finalized_epoch {
            info!(
                block_number,
                epoch,
                finalized_epoch = head.finalized_epoch,
                "Prices block has not been finalized yet, waiting."
            );
            return Ok(None);
        }

        let job = PriceJob { config, node_address, block_number };
        Ok(self.flight.spawn(job.execute()))
    }
}

#[async_trait]
impl WatchtowerTask for SubmitPricesTask {
    fn name(&self) -> &'static str {
        TASK_NAME
    }

    async fn run(&self, config: Arc<Config>, state: Arc<NetworkState>) -> Result<()> {
        self.launch(config, state).await.map(|_| ())
    }
}

/// Consensus epoch containing `timestamp`.
fn epoch_at(timestamp: u64, config: &BeaconConfig) -> Result<u64> {
    if config.seconds_per_slot == 0 || config.slots_per_epoch == 0 {
        return Err(eyre!("Malformed beacon config: {:?}", config));
    }
    let slot = timestamp.saturating_sub(config.genesis_time) / config.seconds_per_slot;
    Ok(slot / config.slots_per_epoch)
}

struct PriceJob {
    config: Arc<Config>,
    node_address: Address,
    block_number: u64,
}

impl PriceJob {
    async fn execute(self) -> Result<()> {
        let block_number = self.block_number;
        let rpl_price = self.twap_price().await?;
        info!(block_number, rpl_price = %rpl_price, "Computed RPL price");

        let ledger = SubmissionLedger::new(self.config.execution_client());
        let subject = U256::from(block_number);
        if ledger.has_submitted(SubmissionPurpose::Prices, self.node_address, subject, Some(rpl_price)).await? {
            info!(block_number, "Prices for this block were already submitted");
            WATCHTOWER_METRICS.skipped_duplicate_submissions.add(1, &task_attributes(TASK_NAME));
            return Ok(());
        }
        if ledger.has_submitted(SubmissionPurpose::Prices, self.node_address, subject, None).await? {
            warn!(block_number, "Previously submitted out-of-date prices for this block, trying again");
        }

        let call = PreparedCall::SubmitPrices { block_number: subject, rpl_price };
        let tx_hash = self
            .config
            .transaction_submitter()
            .submit(call, fee_options(self.config.fee_params(), U256::ZERO))
            .await
            .wrap_err_with(|| format!("Failed to submit prices for block {}", block_number))?;

        WATCHTOWER_METRICS.submissions.add(1, &task_attributes(TASK_NAME));
        info!(block_number, tx_hash = %tx_hash, "Submitted RPL price");
        Ok(())
    }

    async fn twap_price(&self) -> Result<U256> {
        let pool = self.config.price_params().twap_pool.ok_or_else(|| eyre!("TWAP pool address is not configured"))?;
        let tick_cumulatives = self
            .config
            .execution_client()
            .observe_pool(pool, vec![TWAP_WINDOW_SECONDS, 0], self.block_number)
            .await
            .wrap_err_with(|| format!("Failed to observe pool {} at block {}", pool, self.block_number))?;
        let tick = average_tick(&tick_cumulatives, TWAP_WINDOW_SECONDS)?;
        Ok(tick_to_price(tick))
    }
}
