pub mod engine;
pub mod error;
pub mod plan;
pub mod runner;

pub use engine::Provisioner;
pub use error::*;
pub use plan::ExecutionPlan;
pub use runner::{ProcessRunner, ProcessStatus, SystemRunner};
