use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use color_eyre::eyre::eyre;
use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{error, info, Instrument};

use crate::utils::metrics::{task_attributes, WATCHTOWER_METRICS};

/// At most one background execution per task.
///
/// Cloning shares the underlying flag.
#[derive(Clone)]
pub struct SingleFlight {
    name: &'static str,
    running: Arc<Mutex<bool>>,
}

impl SingleFlight {
    pub fn new(name: &'static str) -> Self {
        Self { name, running: Arc::new(Mutex::new(false)) }
    }

    /// Sets the running flag. Returns `false` if it was already set.
    pub fn try_start(&self) -> bool {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if *running {
            return false;
        }
        *running = true;
        true
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears the flag and reports the outcome of the background execution.
    pub fn finish(&self, result: color_eyre::Result<()>) {
        if let Err(e) = result {
            error!(task = self.name, error = %e, error_chain = ?e, "Background execution failed");
            WATCHTOWER_METRICS.background_failures.add(1, &task_attributes(self.name));
        }
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    /// Runs `fut` on its own tokio task unless an execution is already in progress.
    ///
    /// The flag is cleared when `fut` completes, fails or panics.
    pub fn spawn<F>(&self, fut: F) -> Option<JoinHandle<()>>
    where
        F: Future<Output = color_eyre::Result<()>> + Send + 'static,
    {
        if !self.try_start() {
            info!(task = self.name, "Background execution already in progress, skipping");
            return None;
        }

        let flight = self.clone();
        let handle = tokio::spawn(
            async move {
                let started = Instant::now();
                let result = match AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(result) => result,
                    Err(panic) => {
                        let reason = panic
                            .downcast_ref::<&str>()
                            .map(|s| s.to_string())
                            .or_else(|| panic.downcast_ref::<String>().cloned())
                            .unwrap_or_else(|| "unknown panic".to_string());
                        Err(eyre!("Background execution panicked: {}", reason))
                    }
                };
                WATCHTOWER_METRICS
                    .background_run_time
                    .record(started.elapsed().as_secs_f64(), &task_attributes(flight.name));
                flight.finish(result);
            }
            .in_current_span(),
        );
        Some(handle)
    }
}
