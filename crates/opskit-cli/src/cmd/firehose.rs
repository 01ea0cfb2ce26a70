use crate::output::{confirm, print_json, print_kv, warn_on_timeout};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::firehose::Firehose;
use opskit_aws::iam::{self, Roles};
use opskit_aws::AwsContext;
use opskit_core::wait::WaitOpts;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum FirehoseSubcommand {
    /// Create a direct-put stream delivering into an S3 bucket, then wait
    /// for ACTIVE. Without --role-arn, an IAM role is provisioned first.
    Ensure {
        /// Delivery stream name
        name: String,
        /// Destination bucket ARN (arn:aws:s3:::bucket)
        #[arg(long)]
        bucket_arn: String,
        /// Existing delivery role ARN; omit to create one
        #[arg(long)]
        role_arn: Option<String>,
        /// Don't wait for the stream to become ACTIVE
        #[arg(long)]
        no_wait: bool,
    },
    /// Show one delivery stream
    Show { name: String },
    /// Delete a delivery stream
    Rm { name: String },
}

pub async fn run(settings: &Settings, subcommand: FirehoseSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let streams = Firehose::new(&ctx);

    match subcommand {
        FirehoseSubcommand::Ensure {
            name,
            bucket_arn,
            role_arn,
            no_wait,
        } => {
            let role_arn = match role_arn {
                Some(arn) => arn,
                None => {
                    // The role survives even if the stream create below
                    // fails; nothing rolls it back.
                    let roles = Roles::new(&ctx);
                    let role_name = format!("{name}-delivery-role");
                    let outcome = roles
                        .ensure(
                            &role_name,
                            &iam::firehose_trust_policy(),
                            &iam::s3_write_policy(&bucket_arn),
                        )
                        .await?;
                    println!("{}", outcome.describe(&format!("role '{role_name}'")));
                    roles.arn(&role_name).await?
                }
            };

            let outcome = streams.ensure(&name, &bucket_arn, &role_arn).await?;
            println!("{}", outcome.describe(&format!("stream '{name}'")));
            if outcome.created() && !no_wait {
                warn_on_timeout(streams.wait_active(&name, WaitOpts::default()).await)?;
            }
            Ok(())
        }

        FirehoseSubcommand::Show { name } => {
            let doc = streams.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("stream '{name}'");
            print_kv(
                &doc,
                &[("Status", "status"), ("Arn", "arn"), ("Type", "type")],
            );
            Ok(())
        }

        FirehoseSubcommand::Rm { name } => {
            confirm(&format!("delete stream '{name}'?"), settings.assume_yes)?;
            streams.delete(&name).await?;
            println!("deleted stream '{name}'");
            Ok(())
        }
    }
}
