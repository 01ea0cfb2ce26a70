use crate::output::{confirm, print_json, print_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::secrets::Secrets;
use opskit_aws::AwsContext;
use opskit_core::render::{truncate, CELL_BUDGET, PLACEHOLDER};
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum SecretSubcommand {
    /// Create the secret if it does not exist; --overwrite updates an
    /// existing one after confirmation
    Ensure {
        /// Secret name
        name: String,
        /// Secret value
        value: String,
        /// Overwrite the value when the secret already exists
        #[arg(long)]
        overwrite: bool,
    },
    /// List secrets
    List,
    /// Show one secret (value truncated for display)
    Show { name: String },
    /// Delete a secret
    Rm {
        name: String,
        /// Skip the recovery window and delete immediately
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(settings: &Settings, subcommand: SecretSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let secrets = Secrets::new(&ctx);

    match subcommand {
        SecretSubcommand::Ensure {
            name,
            value,
            overwrite,
        } => {
            let outcome = secrets.ensure(&name, &value).await?;
            if !outcome.created() && overwrite {
                confirm(
                    &format!("secret '{name}' exists — overwrite its value?"),
                    settings.assume_yes,
                )?;
                secrets.overwrite(&name, &value).await?;
                println!("updated secret '{name}'");
            } else {
                println!("{}", outcome.describe(&format!("secret '{name}'")));
            }
            Ok(())
        }

        SecretSubcommand::List => {
            let list = secrets.list().await?;
            if json {
                return print_json(&list);
            }
            print_table(
                &["NAME", "LAST CHANGED", "ARN"],
                list.into_iter()
                    .map(|s| {
                        vec![
                            s.name,
                            s.last_changed.unwrap_or_else(|| PLACEHOLDER.into()),
                            s.arn
                                .map(|a| truncate(&a, CELL_BUDGET))
                                .unwrap_or_else(|| PLACEHOLDER.into()),
                        ]
                    })
                    .collect(),
            );
            Ok(())
        }

        SecretSubcommand::Show { name } => {
            let doc = secrets.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            let value = doc
                .get("value")
                .and_then(|v| v.as_str())
                .map(|v| truncate(v, CELL_BUDGET))
                .unwrap_or_else(|| PLACEHOLDER.into());
            println!("secret '{name}'");
            println!("  Value    {value}");
            println!(
                "  Version  {}",
                doc.get("version")
                    .and_then(|v| v.as_str())
                    .unwrap_or(PLACEHOLDER)
            );
            Ok(())
        }

        SecretSubcommand::Rm { name, force } => {
            confirm(&format!("delete secret '{name}'?"), settings.assume_yes)?;
            secrets.delete(&name, force).await?;
            println!("deleted secret '{name}'");
            Ok(())
        }
    }
}
