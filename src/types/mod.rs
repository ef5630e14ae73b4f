pub mod build;
pub mod invocation;

pub use build::*;
pub use invocation::*;
