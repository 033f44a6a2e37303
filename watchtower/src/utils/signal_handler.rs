use anyhow::{anyhow, Context, Result};
use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

#[cfg(unix)]
use signal::unix::{signal, SignalKind};

/// Signal that ended the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM, sent by container runtimes
    Terminate,
    /// SIGINT or Ctrl+C
    Interrupt,
    /// SIGQUIT, which skips the drain timeout on expiry
    Quit,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Quit => write!(f, "SIGQUIT"),
        }
    }
}

#[derive(Default)]
pub struct SignalHandler {
    shutdown_signal: Option<ShutdownSignal>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until a termination signal arrives.
    pub async fn wait_for_shutdown(&mut self) -> Result<ShutdownSignal> {
        let received = Self::wait_for_signal().await?;
        self.shutdown_signal = Some(received);
        info!(signal = %received, "Received shutdown signal");
        Ok(received)
    }

    pub fn shutdown_signal(&self) -> Option<ShutdownSignal> {
        self.shutdown_signal
    }

    #[cfg(unix)]
    async fn wait_for_signal() -> Result<ShutdownSignal> {
        let mut sigterm = signal(SignalKind::terminate()).context("Failed to create SIGTERM handler")?;
        let mut sigint = signal(SignalKind::interrupt()).context("Failed to create SIGINT handler")?;
        let mut sigquit = signal(SignalKind::quit()).context("Failed to create SIGQUIT handler")?;

        info!("Signal handler initialized, listening for SIGTERM, SIGINT and SIGQUIT");

        let received = tokio::select! {
            _ = sigterm.recv() => ShutdownSignal::Terminate,
            _ = sigint.recv() => ShutdownSignal::Interrupt,
            _ = sigquit.recv() => {
                warn!("Force quit signal received (SIGQUIT)");
                ShutdownSignal::Quit
            }
        };
        Ok(received)
    }

    #[cfg(not(unix))]
    async fn wait_for_signal() -> Result<ShutdownSignal> {
        info!("Signal handler initialized, listening for Ctrl+C");
        signal::ctrl_c().await.context("Failed to listen for Ctrl+C")?;
        Ok(ShutdownSignal::Interrupt)
    }

    /// Runs `shutdown_fn` bounded by `timeout_secs`.
    ///
    /// A timeout after SIGQUIT exits the process immediately; any other timeout is returned as an error.
    pub async fn handle_graceful_shutdown<F, Fut>(&self, shutdown_fn: F, timeout_secs: u64) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let trigger = self.shutdown_signal.unwrap_or(ShutdownSignal::Interrupt);
        info!(signal = %trigger, timeout_secs, "Starting graceful shutdown");

        match tokio::time::timeout(Duration::from_secs(timeout_secs), shutdown_fn()).await {
            Ok(Ok(())) => {
                info!("Graceful shutdown completed");
                Ok(())
            }
            Ok(Err(e)) => {
                error!(error = %e, "Graceful shutdown failed");
                Err(e)
            }
            Err(_) if trigger == ShutdownSignal::Quit => {
                warn!(timeout_secs, "Shutdown timed out after SIGQUIT, exiting immediately");
                std::process::exit(1);
            }
            Err(_) => {
                warn!(timeout_secs, "Shutdown timed out, in-flight submissions may be incomplete");
                Err(anyhow!("Shutdown timeout of {} seconds exceeded", timeout_secs))
            }
        }
    }
}
