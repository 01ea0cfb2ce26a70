//! Up-front prerequisite checks for the wrapped CLI tools.
//!
//! Missing tools are fatal before any remote call is attempted, so the
//! operator sees an install hint instead of a mid-flow spawn error.

use crate::error::{OpsError, Result};
use std::path::PathBuf;

/// The external tools opskit shells out to.
pub const TOOLS: &[(&str, &str)] = &[
    ("kubectl", "https://kubernetes.io/docs/tasks/tools/"),
    ("helm", "https://helm.sh/docs/intro/install/"),
    ("kind", "https://kind.sigs.k8s.io/docs/user/quick-start/"),
    ("docker", "https://docs.docker.com/engine/install/"),
];

#[derive(Debug)]
pub struct ToolStatus {
    pub tool: &'static str,
    pub path: Option<PathBuf>,
    pub hint: &'static str,
}

/// Non-fatal lookup of a single tool on PATH.
pub fn check(tool: &'static str, hint: &'static str) -> ToolStatus {
    ToolStatus {
        tool,
        path: which::which(tool).ok(),
        hint,
    }
}

/// Fatal lookup: the tool must exist before we build a command line for it.
pub fn require(tool: &str) -> Result<PathBuf> {
    which::which(tool).map_err(|_| {
        let hint = TOOLS
            .iter()
            .find(|(name, _)| *name == tool)
            .map(|(_, h)| *h)
            .unwrap_or("install it and make sure it is on PATH");
        OpsError::PrerequisiteMissing {
            tool: tool.to_string(),
            hint: format!("install: {hint}"),
        }
    })
}

/// Status of every tool plus the standard config files the tools read.
pub fn survey() -> Vec<ToolStatus> {
    TOOLS
        .iter()
        .map(|&(tool, hint)| check(tool, hint))
        .collect()
}

/// The well-known config files worth surfacing in `doctor` output.
/// Returns (label, path, exists).
pub fn config_files() -> Vec<(&'static str, PathBuf, bool)> {
    let Some(home) = home::home_dir() else {
        return Vec::new();
    };
    [
        ("kubeconfig", home.join(".kube/config")),
        ("aws config", home.join(".aws/config")),
        ("aws credentials", home.join(".aws/credentials")),
    ]
    .into_iter()
    .map(|(label, path)| {
        let exists = path.exists();
        (label, path, exists)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_unknown_tool_is_prerequisite_missing() {
        let err = require("definitely-not-a-real-tool-9f2c").unwrap_err();
        match err {
            OpsError::PrerequisiteMissing { tool, hint } => {
                assert_eq!(tool, "definitely-not-a-real-tool-9f2c");
                assert!(hint.contains("install"));
            }
            other => panic!("expected PrerequisiteMissing, got {other:?}"),
        }
    }

    #[test]
    fn survey_covers_every_wrapped_tool() {
        let statuses = survey();
        let names: Vec<&str> = statuses.iter().map(|s| s.tool).collect();
        assert_eq!(names, vec!["kubectl", "helm", "kind", "docker"]);
    }
}
