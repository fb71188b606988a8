//! Command implementations.

pub mod config;
pub mod inspect;
pub mod run;

pub use self::config::execute_config;
pub use self::inspect::execute_inspect;
pub use self::run::{execute_run, run_pipeline, RunOutcome, RunPlan};
