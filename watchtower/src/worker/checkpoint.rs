use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CheckpointError {
    #[error("Reward interval duration is zero")]
    InvalidIntervalDuration,

    #[error("Timestamps and interval must be non-zero (latest: {latest}, reference: {reference}, interval: {interval})")]
    ZeroInput { latest: u64, reference: u64, interval: u64 },

    #[error("Reference timestamp {reference} is after the latest timestamp {latest}")]
    ReferenceInFuture { latest: u64, reference: u64 },
}

/// Number of whole reward intervals between `interval_start` and `now`.
///
/// Zero until the first full interval has passed, including when `now` is before the start.
pub fn elapsed_intervals(now: u64, interval_start: u64, interval_duration: u64) -> Result<u64, CheckpointError> {
    if interval_duration == 0 {
        return Err(CheckpointError::InvalidIntervalDuration);
    }
    Ok(now.saturating_sub(interval_start) / interval_duration)
}

/// The most recent boundary `reference + k * interval` that is not after `latest`.
pub fn latest_submission_timestamp(latest: u64, reference: u64, interval: u64) -> Result<u64, CheckpointError> {
    if latest == 0 || reference == 0 || interval == 0 {
        return Err(CheckpointError::ZeroInput { latest, reference, interval });
    }
    if reference > latest {
        return Err(CheckpointError::ReferenceInFuture { latest, reference });
    }
    let whole_intervals = (latest - reference) / interval;
    Ok(reference + whole_intervals * interval)
}
