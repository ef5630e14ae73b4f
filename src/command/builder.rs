use std::path::PathBuf;

use super::extra_vars::encode_extra_vars;
use crate::types::{BuildInfo, Invocation, InvocationKind, ProvisionConfig};

pub const DEFAULT_ANSIBLE_BIN: &str = "/usr/bin/ansible-playbook";

/// Builds ansible-playbook invocations. Pure: no filesystem or process access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBuilder {
    program: String,
    key_file: PathBuf,
}

impl CommandBuilder {
    pub fn new(program: impl Into<String>, key_file: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            key_file: key_file.into(),
        }
    }

    pub fn version_probe(&self) -> Invocation {
        Invocation {
            kind: InvocationKind::VersionProbe,
            program: self.program.clone(),
            args: vec!["--version".to_string()],
        }
    }

    /// `<extra vars> -i <source>/<inventory_path>/<inventory> <source>/<playbook>`
    pub fn invocation(
        &self,
        build: &BuildInfo,
        config: &ProvisionConfig,
        inventory: &str,
    ) -> Invocation {
        let args = vec![
            encode_extra_vars(build, &self.key_file),
            "-i".to_string(),
            join_clean(&[&build.source_path, &config.inventory_path, inventory]),
            join_clean(&[&build.source_path, &config.playbook_path]),
        ];

        Invocation {
            kind: InvocationKind::Inventory {
                name: inventory.to_string(),
            },
            program: self.program.clone(),
            args,
        }
    }
}

/// Join `/`-separated segments and normalize lexically: empty and `.` elements
/// are dropped and `..` consumes the preceding element. Only the first
/// non-empty segment can make the result absolute. All-empty input yields an
/// empty string; anything else that cleans away entirely yields `.`.
pub fn join_clean(segments: &[&str]) -> String {
    if segments.iter().all(|s| s.is_empty()) {
        return String::new();
    }

    let rooted = segments
        .iter()
        .find(|s| !s.is_empty())
        .is_some_and(|s| s.starts_with('/'));

    let mut parts: Vec<&str> = Vec::new();
    for segment in segments {
        for part in segment.split('/') {
            match part {
                "" | "." => {}
                ".." => {
                    if parts.last().is_some_and(|p| *p != "..") {
                        parts.pop();
                    } else if !rooted {
                        parts.push("..");
                    }
                }
                _ => parts.push(part),
            }
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}
