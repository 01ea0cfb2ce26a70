//! Cognito user pools: list, show, idempotent user creation.

use crate::context::AwsContext;
use crate::sdk::{error_code, remote_failure, ProvideErrorMetadata, SdkError};
use aws_sdk_cognitoidentityprovider::types::AttributeType;
use aws_sdk_cognitoidentityprovider::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, OpsError, Result};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct PoolSummary {
    pub id: String,
    pub name: Option<String>,
}

pub struct UserPools {
    client: Client,
}

impl UserPools {
    pub fn new(ctx: &AwsContext) -> Self {
        UserPools {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn list(&self) -> Result<Vec<PoolSummary>> {
        let out = self
            .client
            .list_user_pools()
            .max_results(60)
            .send()
            .await
            .map_err(|e| remote_failure("list user pools", &e))?;
        Ok(out
            .user_pools()
            .iter()
            .map(|p| PoolSummary {
                id: p.id().unwrap_or_default().to_string(),
                name: p.name().map(String::from),
            })
            .collect())
    }

    pub async fn show(&self, pool_id: &str) -> Result<Value> {
        let out = self
            .client
            .describe_user_pool()
            .user_pool_id(pool_id)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe user pool '{pool_id}'"), &e))?;
        let pool = out.user_pool();
        Ok(json!({
            "id": pool_id,
            "name": pool.and_then(|p| p.name()),
            "arn": pool.and_then(|p| p.arn()),
            "status": pool.and_then(|p| p.status()).map(|s| s.as_str()),
            "users_estimated": pool.map(|p| p.estimated_number_of_users()),
        }))
    }

    pub async fn user_exists(&self, pool_id: &str, username: &str) -> Result<bool> {
        match self
            .client
            .admin_get_user()
            .user_pool_id(pool_id)
            .username(username)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_user_not_found_exception())
                {
                    Ok(false)
                } else {
                    Err(self.friendly(format!("look up user '{username}'"), err))
                }
            }
        }
    }

    pub async fn ensure_user(
        &self,
        pool_id: &str,
        username: &str,
        email: Option<&str>,
    ) -> Result<Ensure> {
        ensure_with(
            || self.user_exists(pool_id, username),
            || self.create_user(pool_id, username, email),
        )
        .await
    }

    async fn create_user(&self, pool_id: &str, username: &str, email: Option<&str>) -> Result<()> {
        let action = format!("create user '{username}'");
        let mut req = self
            .client
            .admin_create_user()
            .user_pool_id(pool_id)
            .username(username);
        if let Some(email) = email {
            let attr = AttributeType::builder()
                .name("email")
                .value(email)
                .build()
                .map_err(|e| OpsError::remote(action.as_str(), e))?;
            req = req.user_attributes(attr);
        }
        req.send().await.map_err(|e| self.friendly(action, e))?;
        Ok(())
    }

    /// Cognito's admin APIs fail with `NotAuthorizedException` for plain
    /// credential problems; translate that one into something actionable
    /// instead of echoing the exception name.
    fn friendly<E, R>(&self, action: String, err: SdkError<E, R>) -> OpsError
    where
        E: ProvideErrorMetadata,
    {
        if error_code(&err) == Some("NotAuthorizedException") {
            return OpsError::Remote {
                action,
                message: "not authorized — check the active AWS profile has \
                          cognito-idp admin permissions for this pool"
                    .to_string(),
            };
        }
        remote_failure(&action, &err)
    }
}
