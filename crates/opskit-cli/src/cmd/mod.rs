pub mod cluster;
pub mod cognito;
pub mod cost;
pub mod dburl;
pub mod doctor;
pub mod ecr;
pub mod firehose;
pub mod helm;
pub mod k8s;
pub mod lambda;
pub mod param;
pub mod queue;
pub mod s3;
pub mod secret;
pub mod table;
pub mod topic;
