use anyhow::Result;
use clap::Parser;

use tierlink_cli::{create_custom_actions, init_tracing, print_json, CliEnv, Registration};

#[derive(Parser, Debug)]
#[command(name = "create_custom_actions")]
#[command(about = "Register the add/remove custom actions in every catalog context")]
struct Args {
    /// Base URL the receiver is reachable at, e.g. https://hooks.example.com
    endpoint: String,

    /// Object storage (B2) id the actions archive to
    b2_storage_id: String,

    /// Edge storage (LucidLink) id the actions copy to
    ll_storage_id: String,

    /// Optional comma-separated format names, e.g. ORIGINAL,PPRO_PROXY
    formats: Option<String>,

    /// Storage name shown in the action titles
    #[arg(long, default_value = "LucidLink")]
    storage_label: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let env = CliEnv::from_env()?;
    let client = env.catalog_client()?;

    let created = create_custom_actions(
        &client,
        &env,
        &Registration {
            endpoint: &args.endpoint,
            b2_storage_id: &args.b2_storage_id,
            ll_storage_id: &args.ll_storage_id,
            formats: args.formats.as_deref(),
            storage_label: &args.storage_label,
        },
    )
    .await?;

    print_json(&created)
}
