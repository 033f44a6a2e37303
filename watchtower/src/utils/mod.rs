pub mod instrument;
pub mod logging;
pub mod metrics;
pub mod signal_handler;
