pub mod credentials;
pub mod error;
pub mod fs;
pub mod paths;
pub mod tool_config;

pub use credentials::provision_credentials;
pub use error::*;
pub use paths::{resolve_home, StagingPaths};
pub use tool_config::write_global_tool_config;
