use crate::output::{confirm, print_json};
use anyhow::Result;
use clap::Subcommand;
use opskit_core::Settings;
use opskit_kube::kind;

#[derive(Subcommand)]
pub enum ClusterSubcommand {
    /// Create the kind cluster if it does not exist
    Create {
        /// Cluster name
        #[arg(default_value = "kind")]
        name: String,
    },
    /// Delete a kind cluster
    Delete {
        #[arg(default_value = "kind")]
        name: String,
    },
    /// List kind clusters
    List,
}

pub async fn run(settings: &Settings, subcommand: ClusterSubcommand, json: bool) -> Result<()> {
    match subcommand {
        ClusterSubcommand::Create { name } => {
            let outcome = kind::ensure_cluster(&name, settings).await?;
            println!("{}", outcome.describe(&format!("cluster '{name}'")));
            Ok(())
        }

        ClusterSubcommand::Delete { name } => {
            confirm(&format!("delete cluster '{name}'?"), settings.assume_yes)?;
            kind::delete_cluster(&name).await?;
            println!("deleted cluster '{name}'");
            Ok(())
        }

        ClusterSubcommand::List => {
            let clusters = kind::clusters().await?;
            if json {
                return print_json(&clusters);
            }
            if clusters.is_empty() {
                println!("no kind clusters");
                return Ok(());
            }
            for cluster in clusters {
                println!("{cluster}");
            }
            Ok(())
        }
    }
}
