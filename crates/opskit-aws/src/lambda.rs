//! Lambda: list, show, invoke. Deployment is out of scope; these are the
//! read/exercise paths an operator reaches for.

use crate::context::AwsContext;
use crate::sdk::remote_failure;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::Client;
use opskit_core::Result;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
pub struct FunctionSummary {
    pub name: String,
    pub runtime: Option<String>,
    pub memory_mb: Option<i32>,
    pub last_modified: Option<String>,
}

#[derive(Debug)]
pub struct InvokeOutcome {
    /// The function's error marker, when it raised one.
    pub function_error: Option<String>,
    /// Response payload, decoded as UTF-8 where possible.
    pub payload: Option<String>,
}

pub struct Functions {
    client: Client,
}

impl Functions {
    pub fn new(ctx: &AwsContext) -> Self {
        Functions {
            client: Client::new(ctx.config()),
        }
    }

    pub async fn list(&self) -> Result<Vec<FunctionSummary>> {
        let out = self
            .client
            .list_functions()
            .send()
            .await
            .map_err(|e| remote_failure("list functions", &e))?;
        Ok(out
            .functions()
            .iter()
            .map(|f| FunctionSummary {
                name: f.function_name().unwrap_or_default().to_string(),
                runtime: f.runtime().map(|r| r.as_str().to_string()),
                memory_mb: f.memory_size(),
                last_modified: f.last_modified().map(String::from),
            })
            .collect())
    }

    pub async fn show(&self, name: &str) -> Result<Value> {
        let out = self
            .client
            .get_function_configuration()
            .function_name(name)
            .send()
            .await
            .map_err(|e| remote_failure(&format!("describe function '{name}'"), &e))?;
        Ok(json!({
            "name": name,
            "arn": out.function_arn(),
            "runtime": out.runtime().map(|r| r.as_str()),
            "handler": out.handler(),
            "memory_mb": out.memory_size(),
            "timeout_s": out.timeout(),
            "last_modified": out.last_modified(),
        }))
    }

    pub async fn invoke(&self, name: &str, payload: Option<&str>) -> Result<InvokeOutcome> {
        let mut req = self.client.invoke().function_name(name);
        if let Some(body) = payload {
            req = req.payload(Blob::new(body.as_bytes().to_vec()));
        }
        let out = req
            .send()
            .await
            .map_err(|e| remote_failure(&format!("invoke function '{name}'"), &e))?;
        Ok(InvokeOutcome {
            function_error: out.function_error().map(String::from),
            payload: out
                .payload()
                .map(|b| String::from_utf8_lossy(b.as_ref()).into_owned()),
        })
    }
}
