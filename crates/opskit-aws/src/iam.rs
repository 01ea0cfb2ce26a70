//! IAM roles, only as far as Firehose provisioning needs them: an
//! idempotent role-with-inline-policy ensure.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_iam::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, OpsError, Result};

/// Trust policy letting Firehose assume the role.
pub fn firehose_trust_policy() -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Principal": {"Service": "firehose.amazonaws.com"},
            "Action": "sts:AssumeRole",
        }]
    })
    .to_string()
}

/// Inline policy granting the role write access to one bucket.
pub fn s3_write_policy(bucket_arn: &str) -> String {
    serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Effect": "Allow",
            "Action": ["s3:PutObject", "s3:GetBucketLocation", "s3:ListBucket"],
            "Resource": [bucket_arn, format!("{bucket_arn}/*")],
        }]
    })
    .to_string()
}

pub struct Roles {
    client: Client,
}

impl Roles {
    pub fn new(ctx: &AwsContext) -> Self {
        Roles {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        match self.client.get_role().role_name(name).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_no_such_entity_exception())
                {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("get role '{name}'"), &err))
                }
            }
        }
    }

    /// Ensure a role with the given trust policy and one inline policy.
    /// The inline policy is only attached on the create path; an existing
    /// role is taken as-is.
    pub async fn ensure(
        &self,
        name: &str,
        trust_policy: &str,
        inline_policy: &str,
    ) -> Result<Ensure> {
        ensure_with(
            || self.exists(name),
            || self.create(name, trust_policy, inline_policy),
        )
        .await
    }

    async fn create(&self, name: &str, trust_policy: &str, inline_policy: &str) -> Result<()> {
        self.client
            .create_role()
            .role_name(name)
            .assume_role_policy_document(trust_policy)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("create role '{name}'"), &e))?;
        self.client
            .put_role_policy()
            .role_name(name)
            .policy_name(format!("{name}-inline"))
            .policy_document(inline_policy)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("attach policy to role '{name}'"), &e))?;
        Ok(())
    }

    pub async fn arn(&self, name: &str) -> Result<String> {
        let out = self
            .client
            .get_role()
            .role_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("get role '{name}'"), &e))?;
        out.role()
            .map(|r| r.arn().to_string())
            .ok_or_else(|| OpsError::remote(format!("get role '{name}'"), "empty response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trust_policy_names_the_firehose_principal() {
        let policy = firehose_trust_policy();
        assert!(policy.contains("firehose.amazonaws.com"));
        assert!(policy.contains("sts:AssumeRole"));
    }

    #[test]
    fn write_policy_covers_bucket_and_objects() {
        let policy = s3_write_policy("arn:aws:s3:::logs");
        assert!(policy.contains("arn:aws:s3:::logs"));
        assert!(policy.contains("arn:aws:s3:::logs/*"));
    }
}
