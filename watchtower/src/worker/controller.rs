use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};
use watchtower_chain_client_interface::NetworkState;

use crate::core::config::Config;
use crate::utils::metrics::{task_attributes, WATCHTOWER_METRICS};
use crate::worker::tasks::{RelayPricesTask, SubmitPricesTask, SubmitRewardsTreeTask, WatchtowerTask};

/// Polls the chain and drives every task once per new execution block.
pub struct TaskController {
    config: Arc<Config>,
    cancellation_token: CancellationToken,
    tasks: Vec<Box<dyn WatchtowerTask>>,
    last_block: Option<u64>,
}

impl TaskController {
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        let tasks: Vec<Box<dyn WatchtowerTask>> = vec![
            Box::new(RelayPricesTask::new()),
            Box::new(SubmitPricesTask::new()),
            Box::new(SubmitRewardsTreeTask::new()),
        ];
        Self::with_tasks(config, cancellation_token, tasks)
    }

    pub fn with_tasks(
        config: Arc<Config>,
        cancellation_token: CancellationToken,
        tasks: Vec<Box<dyn WatchtowerTask>>,
    ) -> Self {
        Self { config, cancellation_token, tasks, last_block: None }
    }

    /// Runs until the cancellation token fires.
    pub async fn run(mut self) {
        let poll_interval = self.config.service_params().poll_interval;
        info!(poll_interval_secs = poll_interval.as_secs(), tasks = self.tasks.len(), "Starting task controller");

        let mut ticker = tokio::time::interval(poll_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = self.cancellation_token.cancelled() => {
                    info!("Task controller received shutdown signal");
                    break;
                }
                _ = ticker.tick() => self.tick().await,
            }
        }
        info!("Task controller stopped");
    }

    /// Reads the network state and runs every task if the execution block advanced.
    pub async fn tick(&mut self) {
        let state = match self.config.network_state().await {
            Ok(state) => Arc::new(state),
            Err(e) => {
                error!(error = %e, error_chain = ?e, "Failed to load network state");
                return;
            }
        };

        if self.last_block.is_some_and(|last| state.el_block_number <= last) {
            debug!(block = state.el_block_number, "No new execution block");
            return;
        }
        self.last_block = Some(state.el_block_number);
        WATCHTOWER_METRICS.reward_interval_gauge.record(state.reward_interval.index, &[]);

        self.run_tasks(state).await;
    }

    async fn run_tasks(&self, state: Arc<NetworkState>) {
        for task in &self.tasks {
            let name = task.name();
            let span = info_span!("task_run", task = name, block = state.el_block_number);
            WATCHTOWER_METRICS.task_runs.add(1, &task_attributes(name));

            if let Err(e) = task.run(self.config.clone(), state.clone()).instrument(span).await {
                error!(task = name, error = %e, error_chain = ?e, "Task failed");
                WATCHTOWER_METRICS.failed_task_runs.add(1, &task_attributes(name));
            }
        }
    }
}
