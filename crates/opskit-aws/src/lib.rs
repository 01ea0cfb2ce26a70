//! Typed AWS service wrappers.
//!
//! One module per service, each a thin layer over the official SDK client:
//! an existence probe, an idempotent ensure, summaries for display, and
//! status polling where a resource has an activation lifecycle. Nothing is
//! cached; every call goes to the service.

pub mod cognito;
pub mod cost;
pub mod dynamodb;
pub mod ecr;
pub mod firehose;
pub mod iam;
pub mod lambda;
pub mod s3;
pub mod secrets;
pub mod sns;
pub mod sqs;
pub mod ssm;

mod context;
mod sdk;

pub use context::AwsContext;
