//! Secrets Manager: ensure, overwrite, list, show (truncated), delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_secretsmanager::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, Result};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct SecretSummary {
    pub name: String,
    pub arn: Option<String>,
    pub last_changed: Option<String>,
}

pub struct Secrets {
    client: Client,
}

impl Secrets {
    pub fn new(ctx: &AwsContext) -> Self {
        Secrets {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        match self.client.describe_secret().secret_id(name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception())
                {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("describe secret '{name}'"), &err))
                }
            }
        }
    }

    pub async fn ensure(&self, name: &str, value: &str) -> Result<Ensure> {
        ensure_with(|| self.exists(name), || self.create(name, value)).await
    }

    async fn create(&self, name: &str, value: &str) -> Result<()> {
        self.client
            .create_secret()
            .name(name)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("create secret '{name}'"), &e))?;
        Ok(())
    }

    /// Put a new secret value on an existing secret. The caller has already
    /// confirmed the overwrite.
    pub async fn overwrite(&self, name: &str, value: &str) -> Result<()> {
        self.client
            .put_secret_value()
            .secret_id(name)
            .secret_string(value)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("update secret '{name}'"), &e))?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<SecretSummary>> {
        let out = self
            .client
            .list_secrets()
            .send()
            .await
            .map_err(|e| remote_failure("list secrets", &e))?;
        Ok(out
            .secret_list()
            .iter()
            .map(|s| SecretSummary {
                name: s.name().unwrap_or_default().to_string(),
                arn: s.arn().map(String::from),
                last_changed: s.last_changed_date().map(|d| d.to_string()),
            })
            .collect())
    }

    /// Fetch the secret for display. The value comes back verbatim; the CLI
    /// truncates it for table alignment.
    pub async fn show(&self, name: &str) -> Result<Value> {
        let out = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("get secret '{name}'"), &e))?;
        Ok(json!({
            "name": name,
            "arn": out.arn(),
            "version": out.version_id(),
            "value": out.secret_string(),
        }))
    }

    pub async fn delete(&self, name: &str, force: bool) -> Result<()> {
        let mut req = self.client.delete_secret().secret_id(name);
        if force {
            req = req.force_delete_without_recovery(true);
        }
        req.send()
            .await
            .map_err(|e| remote_failure(&format!("delete secret '{name}'"), &e))?;
        Ok(())
    }
}
