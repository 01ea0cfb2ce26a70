use crate::output::{print_json, print_json_table, warn_on_timeout};
use anyhow::Result;
use clap::Subcommand;
use opskit_core::render::Column;
use opskit_core::wait::WaitOpts;
use opskit_kube::kubectl;
use std::time::Duration;

const NODE_COLUMNS: &[Column] = &[
    Column::new("NAME", "metadata.name"),
    Column::new("VERSION", "status.nodeInfo.kubeletVersion"),
    Column::new("OS", "status.nodeInfo.osImage"),
    Column::new("ARCH", "status.nodeInfo.architecture"),
];

#[derive(Subcommand)]
pub enum K8sSubcommand {
    /// List nodes
    Nodes,
    /// Wait until every node is Ready (and at least one exists)
    Wait {
        /// Seconds to wait before giving up
        #[arg(long, default_value = "300")]
        timeout: u64,
        /// Seconds between checks
        #[arg(long, default_value = "5")]
        interval: u64,
    },
    /// Create the namespace if it does not exist
    EnsureNs {
        /// Namespace name
        name: String,
    },
}

pub async fn run(subcommand: K8sSubcommand, json: bool) -> Result<()> {
    match subcommand {
        K8sSubcommand::Nodes => {
            let doc = kubectl::nodes().await?;
            let rows = kubectl::node_rows(&doc);
            if json {
                return print_json(&rows);
            }
            let state = kubectl::readiness(&doc);
            print_json_table(&rows, NODE_COLUMNS);
            println!(
                "\n{}/{} nodes ready",
                state.total - state.not_ready,
                state.total
            );
            Ok(())
        }

        K8sSubcommand::Wait { timeout, interval } => {
            let opts = WaitOpts::new(
                Duration::from_secs(timeout),
                Duration::from_secs(interval),
            );
            let result = kubectl::wait_nodes_ready(opts).await;
            if let Ok(state) = &result {
                println!("{} nodes ready", state.total);
            }
            warn_on_timeout(result.map(|_| ()))?;
            Ok(())
        }

        K8sSubcommand::EnsureNs { name } => {
            let outcome = kubectl::ensure_namespace(&name).await?;
            println!("{}", outcome.describe(&format!("namespace '{name}'")));
            Ok(())
        }
    }
}
