pub mod checkpoint;
pub mod controller;
pub mod ledger;
pub mod relay_fees;
pub mod rotation;
pub mod single_flight;
pub mod snapshot;
pub mod tasks;
pub mod twap;

pub use controller::TaskController;
