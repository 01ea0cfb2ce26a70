//! ECR repositories: ensure, list, show, delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_ecr::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, Result};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct RepoSummary {
    pub name: String,
    pub uri: Option<String>,
    pub created: Option<String>,
}

pub struct Repositories {
    client: Client,
}

impl Repositories {
    pub fn new(ctx: &AwsContext) -> Self {
        Repositories {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        match self
            .client
            .describe_repositories()
            .repository_names(name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_repository_not_found_exception())
                {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("describe repository '{name}'"), &err))
                }
            }
        }
    }

    pub async fn ensure(&self, name: &str) -> Result<Ensure> {
        ensure_with(|| self.exists(name), || self.create(name)).await
    }

    async fn create(&self, name: &str) -> Result<()> {
        self.client
            .create_repository()
            .repository_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("create repository '{name}'"), &e))?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<RepoSummary>> {
        let out = self
            .client
            .describe_repositories()
            .send()
            .await
            .map_err(|e| remote_failure("list repositories", &e))?;
        Ok(out
            .repositories()
            .iter()
            .map(|r| RepoSummary {
                name: r.repository_name().unwrap_or_default().to_string(),
                uri: r.repository_uri().map(String::from),
                created: r.created_at().map(|d| d.to_string()),
            })
            .collect())
    }

    pub async fn show(&self, name: &str) -> Result<Value> {
        let out = self
            .client
            .describe_repositories()
            .repository_names(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe repository '{name}'"), &e))?;
        let repo = out.repositories().first();
        Ok(json!({
            "name": name,
            "uri": repo.and_then(|r| r.repository_uri()),
            "arn": repo.and_then(|r| r.repository_arn()),
            "created": repo.and_then(|r| r.created_at()).map(|d| d.to_string()),
        }))
    }

    /// Delete the repository and, with `force`, any images still in it.
    pub async fn delete(&self, name: &str, force: bool) -> Result<()> {
        self.client
            .delete_repository()
            .repository_name(name)
            .force(force)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete repository '{name}'"), &e))?;
        Ok(())
    }
}
