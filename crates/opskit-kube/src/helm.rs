//! helm: repo management and release deployment.

use crate::exec;
use opskit_core::ensure::ensure_with;
use opskit_core::render::lookup;
use opskit_core::{Ensure, OpsError, Result};
use serde_json::Value;

/// True when `helm repo list -o json` output already carries `name`.
pub fn repo_present(doc: &Value, name: &str) -> bool {
    match doc {
        Value::Array(repos) => repos
            .iter()
            .any(|r| lookup(r, "name").and_then(Value::as_str) == Some(name)),
        _ => false,
    }
}

async fn repo_list() -> Result<Value> {
    // helm exits non-zero when no repositories are configured at all;
    // that case is an empty list, not a failure.
    match exec::run_json("helm", &["repo", "list", "-o", "json"]).await {
        Ok(doc) => Ok(doc),
        Err(OpsError::CommandFailed { .. }) => Ok(Value::Array(Vec::new())),
        Err(other) => Err(other),
    }
}

pub async fn repo_add(name: &str, url: &str) -> Result<Ensure> {
    ensure_with(
        || async { Ok(repo_present(&repo_list().await?, name)) },
        || async {
            exec::run("helm", &["repo", "add", name, url]).await?;
            Ok(())
        },
    )
    .await
}

/// Install or upgrade a release. `helm upgrade --install` is idempotent by
/// construction, so no separate existence check is needed.
pub async fn deploy(
    release: &str,
    chart: &str,
    namespace: &str,
    values: Option<&str>,
) -> Result<()> {
    let mut args = vec![
        "upgrade",
        "--install",
        release,
        chart,
        "--namespace",
        namespace,
        "--create-namespace",
    ];
    if let Some(values) = values {
        args.push("--values");
        args.push(values);
    }
    exec::run("helm", &args).await?;
    Ok(())
}

/// Releases as JSON rows, across all namespaces or scoped to one.
pub async fn releases(namespace: Option<&str>) -> Result<Vec<Value>> {
    let mut args = vec!["list", "-o", "json"];
    match namespace {
        Some(ns) => {
            args.push("--namespace");
            args.push(ns);
        }
        None => args.push("--all-namespaces"),
    }
    let doc = exec::run_json("helm", &args).await?;
    match doc {
        Value::Array(rows) => Ok(rows),
        _ => Ok(Vec::new()),
    }
}

pub async fn uninstall(release: &str, namespace: &str) -> Result<()> {
    exec::run("helm", &["uninstall", release, "--namespace", namespace]).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finds_repo_by_name() {
        let doc = json!([
            {"name": "bitnami", "url": "https://charts.bitnami.com/bitnami"},
            {"name": "jetstack", "url": "https://charts.jetstack.io"},
        ]);
        assert!(repo_present(&doc, "bitnami"));
        assert!(!repo_present(&doc, "grafana"));
    }

    #[test]
    fn malformed_repo_list_is_treated_as_empty() {
        assert!(!repo_present(&json!({}), "bitnami"));
        assert!(!repo_present(&json!(null), "bitnami"));
    }
}
