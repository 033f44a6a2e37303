/// Contains the CLI arguments for the service
pub mod cli;
/// Contains the core logic for the service: configuration, chain state and clients
pub mod core;
/// Contains the error types for the service
pub mod error;
/// Contains the types and validated parameters for the service
pub mod types;
/// Contains the utils for the service: logging, metrics, instrumentation and signals
pub mod utils;
/// Contains the scheduling layer and the watchtower tasks
pub mod worker;

#[cfg(test)]
mod tests;

pub use error::{WatchtowerError, WatchtowerResult};
