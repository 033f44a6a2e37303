use std::time::Duration;

use crate::cli::service::ServiceCliArgs;

#[derive(Debug, Clone)]
pub struct ServiceParams {
    pub poll_interval: Duration,
    /// `None` walks back one epoch.
    pub max_snapshot_walkback: Option<u64>,
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServiceParams {
    fn default() -> Self {
        Self { poll_interval: Duration::from_secs(12), max_snapshot_walkback: None, shutdown_timeout_seconds: 60 }
    }
}

impl From<ServiceCliArgs> for ServiceParams {
    fn from(args: ServiceCliArgs) -> Self {
        Self {
            poll_interval: Duration::from_secs(args.poll_interval_seconds),
            max_snapshot_walkback: args.max_snapshot_walkback,
            shutdown_timeout_seconds: args.shutdown_timeout_seconds,
        }
    }
}
