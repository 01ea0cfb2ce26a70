use crate::output::{print_json, print_kv, print_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::cognito::UserPools;
use opskit_aws::AwsContext;
use opskit_core::render::PLACEHOLDER;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum CognitoSubcommand {
    /// List user pools
    Pools,
    /// Show one user pool
    Show {
        /// User pool id (e.g. eu-west-1_Ab12Cd34)
        pool_id: String,
    },
    /// Create a user in a pool if the username is free
    UserCreate {
        /// User pool id
        pool_id: String,
        /// Username
        username: String,
        /// Email attribute to attach
        #[arg(long)]
        email: Option<String>,
    },
}

pub async fn run(settings: &Settings, subcommand: CognitoSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let pools = UserPools::new(&ctx);

    match subcommand {
        CognitoSubcommand::Pools => {
            let list = pools.list().await?;
            if json {
                return print_json(&list);
            }
            print_table(
                &["ID", "NAME"],
                list.into_iter()
                    .map(|p| vec![p.id, p.name.unwrap_or_else(|| PLACEHOLDER.into())])
                    .collect(),
            );
            Ok(())
        }

        CognitoSubcommand::Show { pool_id } => {
            let doc = pools.show(&pool_id).await?;
            if json {
                return print_json(&doc);
            }
            println!("user pool '{pool_id}'");
            print_kv(
                &doc,
                &[
                    ("Name", "name"),
                    ("Arn", "arn"),
                    ("Status", "status"),
                    ("Users (est.)", "users_estimated"),
                ],
            );
            Ok(())
        }

        CognitoSubcommand::UserCreate {
            pool_id,
            username,
            email,
        } => {
            let outcome = pools
                .ensure_user(&pool_id, &username, email.as_deref())
                .await?;
            println!("{}", outcome.describe(&format!("user '{username}'")));
            Ok(())
        }
    }
}
