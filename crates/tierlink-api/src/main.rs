use tierlink_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize the application (telemetry, HTTP client, routes)
    let (_state, router) = tierlink_api::setup::initialize_app(config.clone())?;

    // Start the server
    tierlink_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
