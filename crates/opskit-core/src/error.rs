use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpsError {
    #[error("required tool not found: {tool}\n{hint}")]
    PrerequisiteMissing { tool: String, hint: String },

    #[error("{action} failed: {message}")]
    Remote { action: String, message: String },

    #[error("'{tool}' exited with status {code}: {detail}")]
    CommandFailed {
        tool: String,
        code: i32,
        detail: String,
    },

    #[error("timed out after {}s waiting for {what} (last status: {last})", .waited.as_secs())]
    PollTimeout {
        what: String,
        waited: Duration,
        last: String,
    },

    #[error("aborted by user")]
    Declined,

    #[error("invalid {kind} URL: {reason}")]
    InvalidUrl { kind: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl OpsError {
    /// Wrap a remote API failure, naming the operation that was attempted.
    /// The underlying message is surfaced verbatim; nothing is retried.
    pub fn remote(action: impl Into<String>, err: impl std::fmt::Display) -> Self {
        OpsError::Remote {
            action: action.into(),
            message: err.to_string(),
        }
    }

    /// Exit code this error should produce. Subprocess failures pass the
    /// wrapped tool's code through; everything else is a generic 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            OpsError::Declined => 0,
            OpsError::CommandFailed { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declined_exits_clean() {
        assert_eq!(OpsError::Declined.exit_code(), 0);
    }

    #[test]
    fn command_failure_propagates_tool_exit_code() {
        let err = OpsError::CommandFailed {
            tool: "kubectl".into(),
            code: 127,
            detail: "not found".into(),
        };
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn remote_failures_are_generic_failures() {
        let err = OpsError::remote("create bucket 'x'", "AccessDenied");
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "create bucket 'x' failed: AccessDenied");
    }
}
