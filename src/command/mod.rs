pub mod builder;
pub mod extra_vars;

pub use builder::{join_clean, CommandBuilder, DEFAULT_ANSIBLE_BIN};
pub use extra_vars::encode_extra_vars;
