//! Kinesis Firehose delivery streams: ensure (S3 destination) with ACTIVE
//! polling, show, delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_firehose::types::{DeliveryStreamType, ExtendedS3DestinationConfiguration};
use aws_sdk_firehose::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::wait::{self, Probe, WaitOpts};
use opskit_core::{Ensure, OpsError, Result};
use serde_json::{json, Value};

pub struct Firehose {
    client: Client,
}

impl Firehose {
    pub fn new(ctx: &AwsContext) -> Self {
        Firehose {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        match self
            .client
            .describe_delivery_stream()
            .delivery_stream_name(name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception())
                {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("describe stream '{name}'"), &err))
                }
            }
        }
    }

    /// Create a direct-put stream delivering into `bucket_arn` under
    /// `role_arn`. If the role was created earlier in this flow and the
    /// stream create fails, the role is left behind — no rollback.
    pub async fn ensure(&self, name: &str, bucket_arn: &str, role_arn: &str) -> Result<Ensure> {
        ensure_with(
            || self.exists(name),
            || self.create(name, bucket_arn, role_arn),
        )
        .await
    }

    async fn create(&self, name: &str, bucket_arn: &str, role_arn: &str) -> Result<()> {
        let action = format!("create stream '{name}'");
        let dest = ExtendedS3DestinationConfiguration::builder()
            .role_arn(role_arn)
            .bucket_arn(bucket_arn)
            .build()
            .map_err(|e| OpsError::remote(action.as_str(), e))?;
        self.client
            .create_delivery_stream()
            .delivery_stream_name(name)
            .delivery_stream_type(DeliveryStreamType::DirectPut)
            .extended_s3_destination_configuration(dest)
            .send()
            .await
            .map_err(|e| remote_failure(&action, &e))?;
        Ok(())
    }

    pub async fn status(&self, name: &str) -> Result<String> {
        let out = self
            .client
            .describe_delivery_stream()
            .delivery_stream_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe stream '{name}'"), &e))?;
        Ok(out
            .delivery_stream_description()
            .map(|d| d.delivery_stream_status().as_str().to_string())
            .unwrap_or_else(|| "UNKNOWN".to_string()))
    }

    /// Poll until the stream reports ACTIVE.
    pub async fn wait_active(&self, name: &str, opts: WaitOpts) -> Result<()> {
        let what = format!("stream '{name}' to be ACTIVE");
        wait::until_ready(&what, opts, || async {
            let status = self.status(name).await?;
            if status == "ACTIVE" {
                Ok(Probe::Ready(()))
            } else {
                Ok(Probe::Pending(status))
            }
        })
        .await
    }

    pub async fn show(&self, name: &str) -> Result<Value> {
        let out = self
            .client
            .describe_delivery_stream()
            .delivery_stream_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe stream '{name}'"), &e))?;
        let desc = out.delivery_stream_description();
        Ok(json!({
            "name": name,
            "status": desc.map(|d| d.delivery_stream_status().as_str()),
            "arn": desc.map(|d| d.delivery_stream_arn()),
            "type": desc.map(|d| d.delivery_stream_type().as_str()),
        }))
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        self.client
            .delete_delivery_stream()
            .delivery_stream_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete stream '{name}'"), &e))?;
        Ok(())
    }
}
