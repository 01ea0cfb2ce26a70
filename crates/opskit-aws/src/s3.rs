//! S3 buckets: ensure, seed, list, show, delete.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use opskit_core::ensure::ensure_with;
use opskit_core::{Ensure, Result};
use serde::Serialize;
use serde_json::{json, Value};

/// Objects written into a freshly created bucket so the operator has
/// something to list. Seeded only on create, never on an existing bucket,
/// so repeat runs leave them content-identical.
pub const SAMPLE_OBJECTS: &[(&str, &str)] = &[
    ("samples/hello.txt", "hello from opskit\n"),
    ("samples/config.json", "{\"sample\":true}\n"),
];

#[derive(Debug, Serialize)]
pub struct BucketSummary {
    pub name: String,
    pub created: Option<String>,
}

pub struct Buckets {
    client: Client,
    region: Option<String>,
}

impl Buckets {
    pub fn new(ctx: &AwsContext) -> Self {
        Buckets {
            client: Client::new(ctx.config()),
            region: ctx.region().map(String::from),
        }
    }

    pub async fn exists(&self, bucket: &str) -> Result<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err.as_service_error().is_some_and(|e| e.is_not_found()) {
                    Ok(false)
                } else {
                    Err(remote_failure(&format!("head bucket '{bucket}'"), &err))
                }
            }
        }
    }

    pub async fn ensure(&self, bucket: &str) -> Result<Ensure> {
        ensure_with(|| self.exists(bucket), || self.create(bucket)).await
    }

    async fn create(&self, bucket: &str) -> Result<()> {
        let mut req = self.client.create_bucket().bucket(bucket);
        // us-east-1 rejects an explicit location constraint
        if let Some(region) = self.region.as_deref().filter(|r| *r != "us-east-1") {
            req = req.create_bucket_configuration(
                CreateBucketConfiguration::builder()
                    .location_constraint(BucketLocationConstraint::from(region))
                    .build(),
            );
        }
        req.send()
            .await
            .map_err(|e| remote_failure(&format!("create bucket '{bucket}'"), &e))?;
        Ok(())
    }

    /// Upload the sample objects. Callers gate this on the `Created`
    /// outcome of `ensure`.
    pub async fn seed_samples(&self, bucket: &str) -> Result<usize> {
        for (key, body) in SAMPLE_OBJECTS {
            self.client
                .put_object()
                .bucket(bucket)
                .key(*key)
                .body(ByteStream::from_static(body.as_bytes()))
                .send()
                .await
                .map_err(|e| remote_failure(&format!("put object '{key}'"), &e))?;
        }
        Ok(SAMPLE_OBJECTS.len())
    }

    pub async fn list(&self) -> Result<Vec<BucketSummary>> {
        let out = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| remote_failure("list buckets", &e))?;
        Ok(out
            .buckets()
            .iter()
            .map(|b| BucketSummary {
                name: b.name().unwrap_or_default().to_string(),
                created: b.creation_date().map(|d| d.to_string()),
            })
            .collect())
    }

    pub async fn show(&self, bucket: &str) -> Result<Value> {
        let location = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("get location of bucket '{bucket}'"), &e))?;
        let region = location
            .location_constraint()
            .map(|c| c.as_str().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "us-east-1".to_string());

        let objects = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(1000)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("list objects in bucket '{bucket}'"), &e))?;

        Ok(json!({
            "name": bucket,
            "region": region,
            "objects": objects.key_count().unwrap_or(0),
            "truncated": objects.is_truncated().unwrap_or(false),
        }))
    }

    /// Delete the bucket. S3 refuses non-empty buckets; that refusal is
    /// surfaced verbatim rather than force-emptying anything.
    pub async fn delete(&self, bucket: &str) -> Result<()> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("delete bucket '{bucket}'"), &e))?;
        Ok(())
    }
}
