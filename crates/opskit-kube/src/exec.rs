//! Typed subprocess invocation for the wrapped tools.

use opskit_core::{prereq, OpsError, Result};
use serde_json::Value;
use tokio::process::Command;

pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run a tool and capture its output. Fails up front if the tool is not on
/// PATH, and on a non-zero exit propagates the tool's code verbatim.
pub async fn run(tool: &str, args: &[&str]) -> Result<ToolOutput> {
    prereq::require(tool)?;
    tracing::debug!(tool, ?args, "exec");

    let output = Command::new(tool).args(args).output().await?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(OpsError::CommandFailed {
            tool: tool.to_string(),
            code: output.status.code().unwrap_or(-1),
            detail: snippet(&stderr),
        });
    }
    Ok(ToolOutput { stdout, stderr })
}

/// Run a tool purely as a predicate: true on exit 0, false on any non-zero
/// exit. Spawn failures and a missing tool are still errors.
pub async fn probe(tool: &str, args: &[&str]) -> Result<bool> {
    prereq::require(tool)?;
    tracing::debug!(tool, ?args, "probe");
    let output = Command::new(tool).args(args).output().await?;
    Ok(output.status.success())
}

/// Run a tool that prints JSON and parse its stdout.
pub async fn run_json(tool: &str, args: &[&str]) -> Result<Value> {
    let out = run(tool, args).await?;
    let value = serde_json::from_str(&out.stdout)?;
    Ok(value)
}

fn snippet(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return "(no output on stderr)".to_string();
    }
    trimmed.chars().take(500).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_trims_and_bounds() {
        assert_eq!(snippet("  boom  \n"), "boom");
        assert_eq!(snippet(""), "(no output on stderr)");
        assert_eq!(snippet(&"x".repeat(2000)).chars().count(), 500);
    }
}
