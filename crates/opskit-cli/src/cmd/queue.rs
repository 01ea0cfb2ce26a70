use crate::output::{confirm, print_json, print_kv};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::sqs::Queues;
use opskit_aws::AwsContext;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum QueueSubcommand {
    /// Create the queue if it does not exist
    Ensure { name: String },
    /// List queue URLs
    List,
    /// Show one queue's attributes
    Show { name: String },
    /// Drop every message in the queue
    Purge { name: String },
    /// Delete a queue
    Rm { name: String },
}

pub async fn run(settings: &Settings, subcommand: QueueSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let queues = Queues::new(&ctx);

    match subcommand {
        QueueSubcommand::Ensure { name } => {
            let outcome = queues.ensure(&name).await?;
            println!("{}", outcome.describe(&format!("queue '{name}'")));
            Ok(())
        }

        QueueSubcommand::List => {
            let urls = queues.list().await?;
            if json {
                return print_json(&urls);
            }
            for url in urls {
                println!("{url}");
            }
            Ok(())
        }

        QueueSubcommand::Show { name } => {
            let doc = queues.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("queue '{name}'");
            print_kv(
                &doc,
                &[
                    ("Url", "url"),
                    ("Arn", "arn"),
                    ("Messages", "messages"),
                    ("In flight", "in_flight"),
                    ("Visibility timeout", "visibility_timeout"),
                ],
            );
            Ok(())
        }

        QueueSubcommand::Purge { name } => {
            confirm(
                &format!("purge every message in queue '{name}'?"),
                settings.assume_yes,
            )?;
            queues.purge(&name).await?;
            println!("purged queue '{name}'");
            Ok(())
        }

        QueueSubcommand::Rm { name } => {
            confirm(&format!("delete queue '{name}'?"), settings.assume_yes)?;
            queues.delete(&name).await?;
            println!("deleted queue '{name}'");
            Ok(())
        }
    }
}
