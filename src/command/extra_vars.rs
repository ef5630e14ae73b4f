//! Encodes build metadata as ansible-playbook extra variables

use std::path::Path;

use crate::types::BuildInfo;

pub const SSH_KEY_VAR: &str = "ansible_ssh_private_key_file";
pub const COMMIT_SHA_VAR: &str = "commit_sha";
pub const COMMIT_TAG_VAR: &str = "commit_tag";

/// Render `-e key=value` tokens joined by single spaces.
///
/// Order is fixed: private key path, commit sha, then commit tag when the build has one.
/// The result is passed to ansible-playbook as a single argument.
pub fn encode_extra_vars(build: &BuildInfo, key_file: &Path) -> String {
    let mut vars = vec![
        extra_var(SSH_KEY_VAR, &key_file.display().to_string()),
        extra_var(COMMIT_SHA_VAR, &build.commit_sha),
    ];

    if let Some(tag) = build.tag() {
        vars.push(extra_var(COMMIT_TAG_VAR, tag));
    }

    vars.join(" ")
}

fn extra_var(key: &str, value: &str) -> String {
    format!("-e {key}={value}")
}
