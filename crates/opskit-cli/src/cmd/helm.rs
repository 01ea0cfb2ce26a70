use crate::output::{confirm, print_json, print_json_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_core::render::Column;
use opskit_core::Settings;
use opskit_kube::helm;

const RELEASE_COLUMNS: &[Column] = &[
    Column::new("NAME", "name"),
    Column::new("NAMESPACE", "namespace"),
    Column::new("CHART", "chart"),
    Column::new("STATUS", "status"),
    Column::new("UPDATED", "updated"),
];

#[derive(Subcommand)]
pub enum HelmSubcommand {
    /// Add a chart repository if it is not configured yet
    RepoAdd {
        /// Repository name
        name: String,
        /// Repository URL
        url: String,
    },
    /// Install or upgrade a release (idempotent)
    Deploy {
        /// Release name
        release: String,
        /// Chart reference (repo/chart or a path)
        chart: String,
        /// Target namespace (created if missing)
        #[arg(long, short = 'n', default_value = "default")]
        namespace: String,
        /// Values file to apply
        #[arg(long)]
        values: Option<String>,
    },
    /// List releases
    List {
        /// Restrict to one namespace (default: all)
        #[arg(long, short = 'n')]
        namespace: Option<String>,
    },
    /// Uninstall a release
    Uninstall {
        release: String,
        #[arg(long, short = 'n', default_value = "default")]
        namespace: String,
    },
}

pub async fn run(settings: &Settings, subcommand: HelmSubcommand, json: bool) -> Result<()> {
    match subcommand {
        HelmSubcommand::RepoAdd { name, url } => {
            let outcome = helm::repo_add(&name, &url).await?;
            println!("{}", outcome.describe(&format!("helm repo '{name}'")));
            Ok(())
        }

        HelmSubcommand::Deploy {
            release,
            chart,
            namespace,
            values,
        } => {
            helm::deploy(&release, &chart, &namespace, values.as_deref()).await?;
            println!("deployed release '{release}' ({chart}) into '{namespace}'");
            Ok(())
        }

        HelmSubcommand::List { namespace } => {
            let rows = helm::releases(namespace.as_deref()).await?;
            if json {
                return print_json(&rows);
            }
            if rows.is_empty() {
                println!("no releases");
                return Ok(());
            }
            print_json_table(&rows, RELEASE_COLUMNS);
            Ok(())
        }

        HelmSubcommand::Uninstall { release, namespace } => {
            confirm(
                &format!("uninstall release '{release}' from '{namespace}'?"),
                settings.assume_yes,
            )?;
            helm::uninstall(&release, &namespace).await?;
            println!("uninstalled release '{release}'");
            Ok(())
        }
    }
}
