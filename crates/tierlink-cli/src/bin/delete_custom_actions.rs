use anyhow::Result;
use clap::Parser;

use tierlink_cli::{delete_custom_actions, init_tracing, print_json, CliEnv};

#[derive(Parser, Debug)]
#[command(name = "delete_custom_actions")]
#[command(about = "Delete the custom actions registered for an endpoint")]
struct Args {
    /// Base URL the actions were registered with
    endpoint: String,

    /// Only delete actions registered with exactly these formats
    formats: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let env = CliEnv::from_env()?;
    let client = env.catalog_client()?;

    let deleted = delete_custom_actions(&client, &args.endpoint, args.formats.as_deref()).await?;
    if deleted.is_empty() {
        tracing::info!(endpoint = %args.endpoint, "No matching custom actions found");
    }

    print_json(&deleted)
}
