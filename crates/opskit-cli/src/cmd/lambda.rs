use crate::output::{print_json, print_kv, print_table};
use anyhow::Result;
use clap::Subcommand;
use opskit_aws::lambda::Functions;
use opskit_aws::AwsContext;
use opskit_core::render::PLACEHOLDER;
use opskit_core::Settings;

#[derive(Subcommand)]
pub enum LambdaSubcommand {
    /// List functions
    List,
    /// Show one function's configuration
    Show { name: String },
    /// Invoke a function and print its response payload
    Invoke {
        name: String,
        /// JSON payload to send
        #[arg(long)]
        payload: Option<String>,
    },
}

pub async fn run(settings: &Settings, subcommand: LambdaSubcommand, json: bool) -> Result<()> {
    let ctx = AwsContext::load(settings).await;
    let functions = Functions::new(&ctx);

    match subcommand {
        LambdaSubcommand::List => {
            let list = functions.list().await?;
            if json {
                return print_json(&list);
            }
            print_table(
                &["NAME", "RUNTIME", "MEMORY", "LAST MODIFIED"],
                list.into_iter()
                    .map(|f| {
                        vec![
                            f.name,
                            f.runtime.unwrap_or_else(|| PLACEHOLDER.into()),
                            f.memory_mb
                                .map(|m| format!("{m} MB"))
                                .unwrap_or_else(|| PLACEHOLDER.into()),
                            f.last_modified.unwrap_or_else(|| PLACEHOLDER.into()),
                        ]
                    })
                    .collect(),
            );
            Ok(())
        }

        LambdaSubcommand::Show { name } => {
            let doc = functions.show(&name).await?;
            if json {
                return print_json(&doc);
            }
            println!("function '{name}'");
            print_kv(
                &doc,
                &[
                    ("Arn", "arn"),
                    ("Runtime", "runtime"),
                    ("Handler", "handler"),
                    ("Memory (MB)", "memory_mb"),
                    ("Timeout (s)", "timeout_s"),
                    ("Last modified", "last_modified"),
                ],
            );
            Ok(())
        }

        LambdaSubcommand::Invoke { name, payload } => {
            let outcome = functions.invoke(&name, payload.as_deref()).await?;
            if let Some(marker) = &outcome.function_error {
                eprintln!("function error: {marker}");
            }
            match outcome.payload {
                Some(body) => println!("{body}"),
                None => println!("(no payload returned)"),
            }
            Ok(())
        }
    }
}
