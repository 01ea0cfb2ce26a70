//! kind: local cluster lifecycle, with the Docker daemon as a prerequisite.

use crate::exec;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, OpsError, Result, Settings};

/// Cluster names from `kind get clusters` stdout, one per line.
pub fn parse_clusters(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub async fn clusters() -> Result<Vec<String>> {
    let out = exec::run("kind", &["get", "clusters"]).await?;
    Ok(parse_clusters(&out.stdout))
}

pub async fn cluster_exists(name: &str) -> Result<bool> {
    Ok(clusters().await?.iter().any(|c| c == name))
}

/// The kind CLI needs a running Docker daemon; check before any create so
/// the operator gets a plain answer instead of a kind stack trace.
pub async fn require_docker() -> Result<()> {
    if exec::probe("docker", &["info"]).await? {
        Ok(())
    } else {
        Err(OpsError::PrerequisiteMissing {
            tool: "docker".to_string(),
            hint: "the Docker daemon is not running — start it and retry".to_string(),
        })
    }
}

pub async fn ensure_cluster(name: &str, settings: &Settings) -> Result<Ensure> {
    require_docker().await?;
    ensure_with(
        || cluster_exists(name),
        || async {
            let mut args = vec!["create".to_string(), "cluster".to_string()];
            args.push("--name".to_string());
            args.push(name.to_string());
            if let Some(config) = &settings.kind_config {
                args.push("--config".to_string());
                args.push(config.display().to_string());
            }
            if let Some(image) = &settings.kind_image {
                args.push("--image".to_string());
                args.push(image.clone());
            }
            let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
            exec::run("kind", &arg_refs).await?;
            Ok(())
        },
    )
    .await
}

pub async fn delete_cluster(name: &str) -> Result<()> {
    exec::run("kind", &["delete", "cluster", "--name", name]).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_clusters;

    #[test]
    fn splits_and_trims_cluster_lines() {
        assert_eq!(
            parse_clusters("dev\nstaging \n\n"),
            vec!["dev".to_string(), "staging".to_string()]
        );
    }

    #[test]
    fn empty_output_means_no_clusters() {
        assert!(parse_clusters("").is_empty());
        assert!(parse_clusters("\n\n").is_empty());
    }
}
