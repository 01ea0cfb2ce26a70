use crate::output::{confirm, print_json, print_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::ssm::Params;
use opskit_aws::AwsContext;
use opskit_core::render::{truncate, CELL_BUDGET, PLACEHOLDER};
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum ParamSubcommand {
    /// Create the parameter, or overwrite with --overwrite after confirmation
    Set {
        /// Parameter name (e.g. /app/prod/db-url)
        name: String,
        /// Parameter value
        value: String,
        /// Store as SecureString
        #[arg(long)]
        secure: bool,
        /// Overwrite when the parameter already exists
        #[arg(long)]
        overwrite: bool,
    },
    /// Get one parameter, decrypted
    Get { name: String },
    /// List parameters under a path
    List {
        /// Path prefix
        #[arg(default_value = "/")]
        path: String,
    },
    /// Delete a parameter
    Rm { name: String },
}

pub async fn run(settings: &Settings, subcommand: ParamSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let params = Params::new(&ctx);

    match subcommand {
        ParamSubcommand::Set {
            name,
            value,
            secure,
            overwrite,
        } => {
            if overwrite && params.exists(&name).await? {
                confirm(
                    &format!("parameter '{name}' exists — overwrite it?"),
                    settings.assume_yes,
                )?;
            }
            let outcome = params.set(&name, &value, secure, overwrite).await?;
            if outcome.created() {
                println!("set parameter '{name}'");
            } else {
                println!(
                    "parameter '{name}' already exists (pass --overwrite to replace it)"
                );
            }
            Ok(())
        }

        ParamSubcommand::Get { name } => {
            let doc = params.get(&name).await?;
            if json {
                return print_json(&doc);
            }
            let value = doc
                .get("value")
                .and_then(|v| v.as_str())
                .map(|v| truncate(v, CELL_BUDGET))
                .unwrap_or_else(|| PLACEHOLDER.into());
            println!("{value}");
            Ok(())
        }

        ParamSubcommand::List { path } => {
            let list = params.list(&path).await?;
            if json {
                return print_json(&list);
            }
            print_table(
                &["NAME", "TYPE", "VERSION"],
                list.into_iter()
                    .map(|p| {
                        vec![
                            p.name,
                            p.kind.unwrap_or_else(|| PLACEHOLDER.into()),
                            p.version.to_string(),
                        ]
                    })
                    .collect(),
            );
            Ok(())
        }

        ParamSubcommand::Rm { name } => {
            confirm(&format!("delete parameter '{name}'?"), settings.assume_yes)?;
            params.delete(&name).await?;
            println!("deleted parameter '{name}'");
            Ok(())
        }
    }
}
