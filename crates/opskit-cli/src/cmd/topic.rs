use crate::output::{confirm, print_json, print_kv};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::sns::Topics;
use opskit_aws::AwsContext;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum TopicSubcommand {
    /// Create the topic if it does not exist
    Ensure { name: String },
    /// List topic ARNs
    List,
    /// Show one topic's attributes
    Show { name: String },
    /// Delete a topic
    Rm { name: String },
}

pub async fn run(settings: &Settings, subcommand: TopicSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let topics = Topics::new(&ctx);

    match subcommand {
        TopicSubcommand::Ensure { name } => {
            let outcome = topics.ensure(&name).await?;
            println!("{}", outcome.describe(&format!("topic '{name}'")));
            Ok(())
        }

        TopicSubcommand::List => {
            let arns = topics.list().await?;
            if json {
                return print_json(&arns);
            }
            for arn in arns {
                println!("{arn}");
            }
            Ok(())
        }

        TopicSubcommand::Show { name } => {
            let doc = topics.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("topic '{name}'");
            print_kv(
                &doc,
                &[
                    ("Arn", "arn"),
                    ("Display name", "display_name"),
                    ("Confirmed subs", "subscriptions_confirmed"),
                    ("Pending subs", "subscriptions_pending"),
                ],
            );
            Ok(())
        }

        TopicSubcommand::Rm { name } => {
            confirm(&format!("delete topic '{name}'?"), settings.assume_yes)?;
            topics.delete(&name).await?;
            println!("deleted topic '{name}'");
            Ok(())
        }
    }
}
