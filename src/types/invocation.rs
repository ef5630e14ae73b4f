use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvocationKind {
    VersionProbe,
    Inventory { name: String },
}

/// One external process call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(flatten)]
    pub kind: InvocationKind,
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn inventory(&self) -> Option<&str> {
        match &self.kind {
            InvocationKind::Inventory { name } => Some(name),
            InvocationKind::VersionProbe => None,
        }
    }
}

/// Program and arguments joined by single spaces, without quoting.
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
