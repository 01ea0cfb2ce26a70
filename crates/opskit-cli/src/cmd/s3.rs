use crate::output::{confirm, print_json, print_kv, print_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::s3::Buckets;
use opskit_aws::AwsContext;
use opskit_core::render::PLACEHOLDER;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum S3Subcommand {
    /// Create the bucket if it does not exist, seeding sample objects
    Ensure {
        /// Bucket name
        name: String,
        /// Skip sample-object seeding on create
        #[arg(long)]
        no_seed: bool,
    },
    /// List buckets
    List,
    /// Show one bucket's region and object count
    Show { name: String },
    /// Delete an empty bucket
    Rm { name: String },
}

pub async fn run(settings: &Settings, subcommand: S3Subcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let buckets = Buckets::new(&ctx);

    match subcommand {
        S3Subcommand::Ensure { name, no_seed } => {
            let outcome = buckets.ensure(&name).await?;
            // Seeding only on create keeps repeat runs content-identical.
            if outcome.created() && !no_seed {
                let seeded = buckets.seed_samples(&name).await?;
                println!(
                    "{} ({seeded} sample objects seeded)",
                    outcome.describe(&format!("bucket '{name}'"))
                );
            } else {
                println!("{}", outcome.describe(&format!("bucket '{name}'")));
            }
            Ok(())
        }

        S3Subcommand::List => {
            let list = buckets.list().await?;
            if json {
                return print_json(&list);
            }
            print_table(
                &["NAME", "CREATED"],
                list.into_iter()
                    .map(|b| vec![b.name, b.created.unwrap_or_else(|| PLACEHOLDER.into())])
                    .collect(),
            );
            Ok(())
        }

        S3Subcommand::Show { name } => {
            let doc = buckets.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("bucket '{name}'");
            print_kv(
                &doc,
                &[
                    ("Region", "region"),
                    ("Objects", "objects"),
                    ("Truncated", "truncated"),
                ],
            );
            Ok(())
        }

        S3Subcommand::Rm { name } => {
            confirm(&format!("delete bucket '{name}'?"), settings.assume_yes)?;
            buckets.delete(&name).await?;
            println!("deleted bucket '{name}'");
            Ok(())
        }
    }
}
