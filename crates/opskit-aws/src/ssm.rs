//! SSM Parameter Store: set (create-or-confirm-overwrite), get, list, delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_ssm::types::ParameterType;
use aws_sdk_ssm::Client;
use opskit_core::{Ensure, Result};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct ParamSummary {
    pub name: String,
    pub kind: Option<String>,
    pub version: i64,
}

pub struct Params {
    client: Client,
}

impl Params {
    pub fn new(ctx: &AwsContext) -> Self {
        Params {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        match self.client.get_parameter().name(name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_parameter_not_found())
                {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("get parameter '{name}'"), &err))
                }
            }
        }
    }

    /// Create the parameter, or overwrite it when `overwrite` is set (the
    /// caller has already confirmed). Returns `AlreadyExists` when the
    /// parameter was present and overwrite was off.
    pub async fn set(
        &self,
        name: &str,
        value: &str,
        secure: bool,
        overwrite: bool,
    ) -> Result<Ensure> {
        let present = self.exists(name).await?;
        if present && !overwrite {
            return Ok(Ensure::AlreadyExists);
        }
        let kind = if secure {
            ParameterType::SecureString
        } else {
            ParameterType::String
        };
        self.client
            .put_parameter()
            .name(name)
            .value(value)
            .r#type(kind)
            .overwrite(present)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("put parameter '{name}'"), &e))?;
        Ok(Ensure::Created)
    }

    /// Fetch one parameter, decrypted. The CLI truncates SecureString
    /// values for display.
    pub async fn get(&self, name: &str) -> Result<Value> {
        let out = self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("get parameter '{name}'"), &e))?;
        let param = out.parameter();
        Ok(json!({
            "name": name,
            "type": param.and_then(|p| p.r#type()).map(|t| t.as_str()),
            "version": param.map(|p| p.version()),
            "value": param.and_then(|p| p.value()),
        }))
    }

    pub async fn list(&self, path: &str) -> Result<Vec<ParamSummary>> {
        let out = self
            .client
            .get_parameters_by_path()
            .path(path)
            .recursive(true)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("list parameters under '{path}'"), &e))?;
        Ok(out
            .parameters()
            .iter()
            .map(|p| ParamSummary {
                name: p.name().unwrap_or_default().to_string(),
                kind: p.r#type().map(|t| t.as_str().to_string()),
                version: p.version(),
            })
            .collect())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete parameter '{name}'"), &e))?;
        Ok(())
    }
}
