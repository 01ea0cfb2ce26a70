mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{
    cluster::ClusterSubcommand, cognito::CognitoSubcommand, ecr::EcrSubcommand,
    firehose::FirehoseSubcommand, helm::HelmSubcommand, k8s::K8sSubcommand,
    lambda::LambdaSubcommand, param::ParamSubcommand, queue::QueueSubcommand, s3::S3Subcommand,
    secret::SecretSubcommand, table::TableSubcommand, topic::TopicSubcommand,
};
use opskit_core::{OpsError, Settings};

#[derive(Parser)]
#[command(
    name = "opskit",
    about = "Idempotent provisioning toolbox for AWS, Kubernetes, Helm and kind",
    version,
    propagate_version = true
)]
struct Cli {
    /// AWS region (default: profile/instance chain)
    #[arg(long, global = true, env = "AWS_REGION")]
    region: Option<String>,

    /// AWS named profile
    #[arg(long, global = true, env = "AWS_PROFILE")]
    profile: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Answer yes to every confirmation prompt
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage S3 buckets
    S3 {
        #[command(subcommand)]
        subcommand: S3Subcommand,
    },

    /// Manage DynamoDB tables
    Table {
        #[command(subcommand)]
        subcommand: TableSubcommand,
    },

    /// Manage Secrets Manager secrets
    Secret {
        #[command(subcommand)]
        subcommand: SecretSubcommand,
    },

    /// Manage SQS queues
    Queue {
        #[command(subcommand)]
        subcommand: QueueSubcommand,
    },

    /// Manage SNS topics
    Topic {
        #[command(subcommand)]
        subcommand: TopicSubcommand,
    },

    /// Manage ECR repositories
    Ecr {
        #[command(subcommand)]
        subcommand: EcrSubcommand,
    },

    /// Manage SSM parameters
    Param {
        #[command(subcommand)]
        subcommand: ParamSubcommand,
    },

    /// Manage Firehose delivery streams
    Firehose {
        #[command(subcommand)]
        subcommand: FirehoseSubcommand,
    },

    /// Inspect and invoke Lambda functions
    Lambda {
        #[command(subcommand)]
        subcommand: LambdaSubcommand,
    },

    /// Inspect Cognito user pools and create users
    Cognito {
        #[command(subcommand)]
        subcommand: CognitoSubcommand,
    },

    /// Unblended cost by service for a trailing window
    Cost {
        /// Days to look back
        #[arg(long, default_value = "30")]
        days: u32,
    },

    /// Manage kind clusters (honors KIND_CONFIG and KIND_IMAGE)
    Cluster {
        #[command(subcommand)]
        subcommand: ClusterSubcommand,
    },

    /// Kubernetes nodes and namespaces
    K8s {
        #[command(subcommand)]
        subcommand: K8sSubcommand,
    },

    /// Helm repos and releases
    Helm {
        #[command(subcommand)]
        subcommand: HelmSubcommand,
    },

    /// Parse a postgres:// or mongodb:// connection URL
    Dburl { url: String },

    /// Check wrapped tools and standard config files
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if opskit_core::settings::debug_enabled() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    // KIND_CONFIG / KIND_IMAGE come from the environment; region and
    // profile were already merged flag-over-env by clap.
    let mut settings = Settings::from_env();
    settings.region = cli.region;
    settings.profile = cli.profile;
    settings.assume_yes = cli.yes;

    let json = cli.json;
    let result = match cli.command {
        Commands::S3 { subcommand } => cmd::s3::run(&settings, subcommand, json).await,
        Commands::Table { subcommand } => cmd::table::run(&settings, subcommand, json).await,
        Commands::Secret { subcommand } => cmd::secret::run(&settings, subcommand, json).await,
        Commands::Queue { subcommand } => cmd::queue::run(&settings, subcommand, json).await,
        Commands::Topic { subcommand } => cmd::topic::run(&settings, subcommand, json).await,
        Commands::Ecr { subcommand } => cmd::ecr::run(&settings, subcommand, json).await,
        Commands::Param { subcommand } => cmd::param::run(&settings, subcommand, json).await,
        Commands::Firehose { subcommand } => cmd::firehose::run(&settings, subcommand, json).await,
        Commands::Lambda { subcommand } => cmd::lambda::run(&settings, subcommand, json).await,
        Commands::Cognito { subcommand } => cmd::cognito::run(&settings, subcommand, json).await,
        Commands::Cost { days } => cmd::cost::run(&settings, days, json).await,
        Commands::Cluster { subcommand } => cmd::cluster::run(&settings, subcommand, json).await,
        Commands::K8s { subcommand } => cmd::k8s::run(subcommand, json).await,
        Commands::Helm { subcommand } => cmd::helm::run(&settings, subcommand, json).await,
        Commands::Dburl { url } => cmd::dburl::run(&url, json),
        Commands::Doctor => cmd::doctor::run(json),
    };

    if let Err(e) = result {
        if let Some(ops) = e.downcast_ref::<OpsError>() {
            if matches!(ops, OpsError::Declined) {
                // A declined confirmation is a clean early exit, not an error.
                eprintln!("aborted");
                return;
            }
            eprintln!("error: {e:#}");
            std::process::exit(ops.exit_code());
        }
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
