use crate::output::{confirm, print_json, print_kv, warn_on_timeout};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::dynamodb::{TableSpec, Tables};
use opskit_aws::AwsContext;
use opskit_core::wait::WaitOpts;
use opskit_core::Settings;
use std::time::Duration;

#[derive(Subcommand)]
pub enum TableSubcommand {
    /// Create the table if it does not exist, then wait for ACTIVE
    Ensure {
        /// Table name
        name: String,
        /// Hash key attribute (string type)
        #[arg(long, default_value = "pk")]
        hash_key: String,
        /// Provisioned read capacity units (omit for on-demand billing)
        #[arg(long)]
        read_capacity: Option<i64>,
        /// Provisioned write capacity units (omit for on-demand billing)
        #[arg(long)]
        write_capacity: Option<i64>,
        /// Don't wait for the table to become ACTIVE
        #[arg(long)]
        no_wait: bool,
    },
    /// List table names
    List,
    /// Show one table
    Show { name: String },
    /// Wait for a table to report ACTIVE
    Wait {
        name: String,
        /// Seconds to wait before giving up
        #[arg(long, default_value = "300")]
        timeout: u64,
    },
    /// Delete a table
    Rm { name: String },
}

pub async fn run(settings: &Settings, subcommand: TableSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let tables = Tables::new(&ctx);

    match subcommand {
        TableSubcommand::Ensure {
            name,
            hash_key,
            read_capacity,
            write_capacity,
            no_wait,
        } => {
            let spec = TableSpec {
                hash_key,
                read_capacity,
                write_capacity,
            };
            let outcome = tables.ensure(&name, &spec).await?;
            println!("{}", outcome.describe(&format!("table '{name}'")));
            if outcome.created() && !no_wait {
                warn_on_timeout(tables.wait_active(&name, WaitOpts::default()).await)?;
            }
            Ok(())
        }

        TableSubcommand::List => {
            let names = tables.list().await?;
            if json {
                return print_json(&names);
            }
            for name in names {
                println!("{name}");
            }
            Ok(())
        }

        TableSubcommand::Show { name } => {
            let doc = tables.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("table '{name}'");
            print_kv(
                &doc,
                &[
                    ("Status", "status"),
                    ("Arn", "arn"),
                    ("Items", "items"),
                    ("Size (bytes)", "size_bytes"),
                    ("Billing", "billing"),
                ],
            );
            Ok(())
        }

        TableSubcommand::Wait { name, timeout } => {
            let opts = WaitOpts::new(Duration::from_secs(timeout), Duration::from_secs(5));
            let result = tables.wait_active(&name, opts).await;
            if result.is_ok() {
                println!("table '{name}' is ACTIVE");
            }
            warn_on_timeout(result)?;
            Ok(())
        }

        TableSubcommand::Rm { name } => {
            confirm(&format!("delete table '{name}'?"), settings.assume_yes)?;
            tables.delete(&name).await?;
            println!("deleted table '{name}'");
            Ok(())
        }
    }
}
