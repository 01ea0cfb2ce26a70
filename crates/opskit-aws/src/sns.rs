//! SNS topics: ensure, list, show, delete.
//!
//! SNS has no point lookup by name, so existence is a scan of the topic
//! list for an ARN with a matching final segment.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_sns::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, OpsError, Result};
use serde_json::{json, Value};

/// True when `arn` names a topic called `name` (`arn:aws:sns:region:acct:name`).
pub fn arn_matches(arn: &str, name: &str) -> bool {
    arn.rsplit(':').next() == Some(name)
}

pub struct Topics {
    client: Client,
}

impl Topics {
    pub fn new(ctx: &AwsContext) -> Self {
        Topics {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn list(&self) -> Result<Vec<String>> {
        let out = self
            .client
            .list_topics()
            .send()
            .await
            .map_err(|e| remote_failure("list topics", &e))?;
        Ok(out
            .topics()
            .iter()
            .filter_map(|t| t.topic_arn().map(String::from))
            .collect())
    }

    pub async fn find(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|arn| arn_matches(arn, name)))
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.find(name).await?.is_some())
    }

    pub async fn ensure(&self, name: &str) -> Result<Ensure> {
        ensure_with(|| self.exists(name), || self.create(name)).await
    }

    async fn create(&self, name: &str) -> Result<()> {
        self.client
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("create topic '{name}'"), &e))?;
        Ok(())
    }

    pub async fn show(&self, name: &str) -> Result<Value> {
        let arn = self.require_arn(name).await?;
        let out = self
            .client
            .get_topic_attributes()
            .topic_arn(arn.as_str())
            .send()
            .await
            .map_err(|e| remote_failure(&format!("get attributes of topic '{name}'"), &e))?;
        let get = |key: &str| out.attributes().and_then(|m| m.get(key)).map(String::from);
        Ok(json!({
            "name": name,
            "arn": arn,
            "subscriptions_confirmed": get("SubscriptionsConfirmed"),
            "subscriptions_pending": get("SubscriptionsPending"),
            "display_name": get("DisplayName"),
        }))
    }

    pub async fn delete(&self, name: &str) -> Result<()> {
        let arn = self.require_arn(name).await?;
        self.client
            .delete_topic()
            .topic_arn(arn)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete topic '{name}'"), &e))?;
        Ok(())
    }

    async fn require_arn(&self, name: &str) -> Result<String> {
        self.find(name)
            .await?
            .ok_or_else(|| OpsError::remote(format!("resolve topic '{name}'"), "topic does not exist"))
    }
}

#[cfg(test)]
mod tests {
    use super::arn_matches;

    #[test]
    fn matches_only_the_final_arn_segment() {
        assert!(arn_matches("arn:aws:sns:eu-west-1:123:alerts", "alerts"));
        assert!(!arn_matches("arn:aws:sns:eu-west-1:123:alerts-dead", "alerts"));
        assert!(!arn_matches("arn:aws:sns:eu-west-1:123:other", "alerts"));
    }
}
