//! DynamoDB tables: ensure with ACTIVE polling, list, show, delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::wait::{self, Probe, WaitOpts};
use opskit_core::{Ensure, OpsError, Result};
use serde_json::{json, Value};

/// How a new table is keyed and billed. Capacity units switch the table to
/// provisioned billing; leaving both unset means on-demand.
#[derive(Debug, Clone)]
pub struct TableSpec {
    pub hash_key: String,
    pub read_capacity: Option<i64>,
    pub write_capacity: Option<i64>,
}

impl TableSpec {
    fn provisioned(&self) -> Option<(i64, i64)> {
        match (self.read_capacity, self.write_capacity) {
            (Some(r), Some(w)) => Some((r, w)),
            (Some(r), None) => Some((r, r)),
            (None, Some(w)) => Some((w, w)),
            (None, None) => None,
        }
    }
}

pub struct Tables {
    client: Client,
}

impl Tables {
    pub fn new(ctx: &AwsContext) -> Self {
        Tables {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn exists(&self, table: &str) -> Result<bool> {
        match self.client.describe_table().table_name(table).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception())
                {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("describe table '{table}'"), &err))
                }
            }
        }
    }

    pub async fn ensure(&self, table: &str, spec: &TableSpec) -> Result<Ensure> {
        ensure_with(|| self.exists(table), || self.create(table, spec)).await
    }

    async fn create(&self, table: &str, spec: &TableSpec) -> Result<()> {
        let action = format!("create table '{table}'");
        let invalid = |e: &dyn std::fmt::Display| OpsError::remote(action.as_str(), e);

        let attr = AttributeDefinition::builder()
            .attribute_name(spec.hash_key.as_str())
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| invalid(&e))?;
        let key = KeySchemaElement::builder()
            .attribute_name(spec.hash_key.as_str())
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| invalid(&e))?;

        let mut req = self
            .client
            .create_table()
            .table_name(table)
            .attribute_definitions(attr)
            .key_schema(key);

        req = match spec.provisioned() {
            Some((read, write)) => req.billing_mode(BillingMode::Provisioned).provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(read)
                    .write_capacity_units(write)
                    .build()
                    .map_err(|e| invalid(&e))?,
            ),
            None => req.billing_mode(BillingMode::PayPerRequest),
        };

        req.send().await.map_err(|e| remote_failure(&action, &e))?;
        Ok(())
    }

    pub async fn status(&self, table: &str) -> Result<String> {
        let out = self
            .client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe table '{table}'"), &e))?;
        Ok(out
            .table()
            .and_then(|t| t.table_status())
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string()))
    }

    /// Poll until the table reports ACTIVE.
    pub async fn wait_active(&self, table: &str, opts: WaitOpts) -> Result<()> {
        let what = format!("table '{table}' to be ACTIVE");
        wait::until_ready(&what, opts, || async {
            let status = self.status(table).await?;
            if status == "ACTIVE" {
                Ok(Probe::Ready(()))
            } else {
                Ok(Probe::Pending(status))
            }
        })
        .await
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let out = self
            .client
            .list_tables()
            .send()
            .await
            .map_err(|e| remote_failure("list tables", &e))?;
        Ok(out.table_names().to_vec())
    }

    pub async fn show(&self, table: &str) -> Result<Value> {
        let out = self
            .client
            .describe_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe table '{table}'"), &e))?;
        let desc = out.table();
        Ok(json!({
            "name": table,
            "status": desc.and_then(|t| t.table_status()).map(|s| s.as_str()),
            "arn": desc.and_then(|t| t.table_arn()),
            "items": desc.and_then(|t| t.item_count()),
            "size_bytes": desc.and_then(|t| t.table_size_bytes()),
            "billing": desc
                .and_then(|t| t.billing_mode_summary())
                .and_then(|b| b.billing_mode())
                .map(|m| m.as_str()),
        }))
    }

    pub async fn delete(&self, table: &str) -> Result<()> {
        self.client
            .delete_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete table '{table}'"), &e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_defaults_mirror_the_given_side() {
        let spec = |r, w| TableSpec {
            hash_key: "pk".into(),
            read_capacity: r,
            write_capacity: w,
        };
        assert_eq!(spec(None, None).provisioned(), None);
        assert_eq!(spec(Some(5), Some(2)).provisioned(), Some((5, 2)));
        assert_eq!(spec(Some(5), None).provisioned(), Some((5, 5)));
        assert_eq!(spec(None, Some(2)).provisioned(), Some((2, 2)));
    }
}
