use crate::output::{confirm, print_json, print_kv, print_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::ecr::Repositories;
use opskit_aws::AwsContext;
use opskit_core::render::PLACEHOLDER;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum EcrSubcommand {
    /// Create the repository if it does not exist
    Ensure { name: String },
    /// List repositories
    List,
    /// Show one repository
    Show { name: String },
    /// Delete a repository
    Rm {
        name: String,
        /// Also delete any images still in the repository
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(settings: &Settings, subcommand: EcrSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let repos = Repositories::new(&ctx);

    match subcommand {
        EcrSubcommand::Ensure { name } => {
            let outcome = repos.ensure(&name).await?;
            println!("{}", outcome.describe(&format!("repository '{name}'")));
            Ok(())
        }

        EcrSubcommand::List => {
            let list = repos.list().await?;
            if json {
                return print_json(&list);
            }
            print_table(
                &["NAME", "URI", "CREATED"],
                list.into_iter()
                    .map(|r| {
                        vec![
                            r.name,
                            r.uri.unwrap_or_else(|| PLACEHOLDER.into()),
                            r.created.unwrap_or_else(|| PLACEHOLDER.into()),
                        ]
                    })
                    .collect(),
            );
            Ok(())
        }

        EcrSubcommand::Show { name } => {
            let doc = repos.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("repository '{name}'");
            print_kv(
                &doc,
                &[("Uri", "uri"), ("Arn", "arn"), ("Created", "created")],
            );
            Ok(())
        }

        EcrSubcommand::Rm { name, force } => {
            confirm(
                &format!("delete repository '{name}'?"),
                settings.assume_yes,
            )?;
            repos.delete(&name, force).await?;
            println!("deleted repository '{name}'");
            Ok(())
        }
    }
}
