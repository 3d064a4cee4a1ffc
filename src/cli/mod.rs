pub mod command;
pub mod run;

pub use run::{execute, run_app};
