//! Ansible Provision - CI pipeline step for ansible-playbook
//!
//! This crate stages SSH credentials and a global ansible configuration for
//! non-interactive runs, then invokes ansible-playbook once per inventory,
//! stopping at the first failure.

pub mod cli;
pub mod command;
pub mod execution;
pub mod provision;
pub mod types;

pub use command::CommandBuilder;
pub use execution::{ExecutionError, ExecutionPlan, Provisioner};
pub use provision::{ProvisionError, StagingPaths};
pub use types::*;
