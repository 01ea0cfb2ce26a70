//! SQS queues: ensure, list, show attributes, purge, delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, OpsError, Result};
use serde_json::{json, Value};

pub struct Queues {
    client: Client,
}

impl Queues {
    pub fn new(ctx: &AwsContext) -> Self {
        Queues {
            client: Client::new(ctx.config()),
        }
    }

    /// Resolve a queue name to its URL, or None when it does not exist.
    pub async fn url(&self, name: &str) -> Result<Option<String>> {
        match self.client.get_queue_url().queue_name(name).send().await {
            Ok(out) => Ok(out.queue_url().map(String::from)),
            Err(err) => {
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_queue_does_not_exist())
                {
                    Ok(None)
                } else {
                    Err(remote_failure(&format!("resolve queue '{name}'"), &err))
                }
            }
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.url(name).await?.is_some())
    }

    pub async fn ensure(&self, name: &str) -> Result<Ensure> {
        ensure_with(|| self.exists(name), || self.create(name)).await
    }

    async fn create(&self, name: &str) -> Result<()> {
        self.client
            .create_queue()
            .queue_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("create queue '{name}'"), &e))?;
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let out = self
            .client
            .list_queues()
            .send()
            .await
            .map_err(|e| remote_failure("list queues", &e))?;
        Ok(out.queue_urls().to_vec())
    }

    pub async fn show(&self, name: &str) -> Result<Value> {
        let url = self.require_url(name).await?;
        let out = self
            .client
            .get_queue_attributes()
            .queue_url(url.as_str())
            .attribute_names(QueueAttributeName::All)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("get attributes of queue '{name}'"), &e))?;

        let get = |attr: QueueAttributeName| {
            out.attributes()
                .and_then(|m| m.get(&attr))
                .map(String::from)
        };
        Ok(json!({
            "name": name,
            "url": url,
            "arn": get(QueueAttributeName::QueueArn),
            "messages": get(QueueAttributeName::ApproximateNumberOfMessages),
            "in_flight": get(QueueAttributeName::ApproximateNumberOfMessagesNotVisible),
            "visibility_timeout": get(QueueAttributeName::VisibilityTimeout),
        }))
    }

    pub async fn purge(&self, name: &str) -> Result<()> {
        let url = self.require_url(name).await?;
        self.client
            .purge_queue()
            .queue_url(url)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("purge queue '{name}'"), &e))?;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let url = self.require_url(name).await?;
        self.client
            .delete_queue()
            .queue_url(url)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete queue '{name}'"), &e))?;
        Ok(())
    }

    async fn require_url(&self, name: &str) -> Result<String> {
        self.url(name)
            .await?
            .ok_or_else(|| OpsError::remote(format!("resolve queue '{name}'"), "queue does not exist"))
    }
}
