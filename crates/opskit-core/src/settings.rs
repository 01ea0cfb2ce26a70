//! Runtime configuration resolved from flags and environment variables.
//!
//! There is deliberately no config file: every invocation starts from zero
//! local knowledge and rediscovers world state through the remote APIs. The
//! only inputs are command-line flags and the environment variables the
//! wrapped tools already honor.

use std::path::PathBuf;

/// Everything a command handler needs to know about its environment.
/// Built once in `main` and passed down explicitly.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// AWS region override (flag or `AWS_REGION`).
    pub region: Option<String>,
    /// AWS named profile (flag or `AWS_PROFILE`).
    pub profile: Option<String>,
    /// Path to a kind cluster config file (`KIND_CONFIG`).
    pub kind_config: Option<PathBuf>,
    /// Node image for kind clusters (`KIND_IMAGE`).
    pub kind_image: Option<String>,
    /// Skip confirmation prompts (`--yes`).
    pub assume_yes: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Settings {
            region: get("AWS_REGION").filter(|v| !v.is_empty()),
            profile: get("AWS_PROFILE").filter(|v| !v.is_empty()),
            kind_config: get("KIND_CONFIG")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            kind_image: get("KIND_IMAGE").filter(|v| !v.is_empty()),
            assume_yes: false,
        }
    }
}

/// True when the `DEBUG` env var asks for verbose logging.
/// Any non-empty value other than `0` or `false` counts.
pub fn debug_enabled() -> bool {
    match std::env::var("DEBUG") {
        Ok(v) => !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Settings {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        Settings::from_lookup(|k| map.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn picks_up_aws_and_kind_vars() {
        let s = settings_from(&[
            ("AWS_REGION", "eu-west-1"),
            ("AWS_PROFILE", "staging"),
            ("KIND_CONFIG", "/tmp/kind.yaml"),
            ("KIND_IMAGE", "kindest/node:v1.30.0"),
        ]);
        assert_eq!(s.region.as_deref(), Some("eu-west-1"));
        assert_eq!(s.profile.as_deref(), Some("staging"));
        assert_eq!(s.kind_config, Some(PathBuf::from("/tmp/kind.yaml")));
        assert_eq!(s.kind_image.as_deref(), Some("kindest/node:v1.30.0"));
    }

    #[test]
    fn empty_vars_are_treated_as_unset() {
        let s = settings_from(&[("AWS_REGION", ""), ("KIND_IMAGE", "")]);
        assert!(s.region.is_none());
        assert!(s.kind_image.is_none());
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = settings_from(&[]);
        assert!(s.region.is_none());
        assert!(s.profile.is_none());
        assert!(s.kind_config.is_none());
        assert!(!s.assume_yes);
    }
}
