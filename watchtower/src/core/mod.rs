pub mod artifacts;
pub mod client;
pub mod config;
pub mod state;
