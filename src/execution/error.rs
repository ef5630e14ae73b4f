use thiserror::Error;

use crate::provision::ProvisionError;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    #[error("Failed to launch `{command}`: {source}")]
    ProcessLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", exit_description(*code))]
    ProcessExit { command: String, code: Option<i32> },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn exit_description(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, ExecutionError>;
