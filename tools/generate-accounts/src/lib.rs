pub mod cli;
pub mod contract;
pub mod error;
pub mod execute;
pub mod ledger;
pub mod reconcile;
pub mod state;

pub use crate::contract::{run, RunOptions, RunSummary};
pub use crate::error::GeneratorError;
