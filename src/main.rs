use leafclutch_server::{Config, Server, ServerState, init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Environment (.env is optional outside development)
    let _ = dotenv::dotenv();

    // 2. Logging
    init_logger();

    tracing::info!("Leafclutch admin backend starting...");

    // 3. Configuration - refuses to start when required values are missing
    let config = Config::from_env()?;

    // 4. State (database, migrations, admin seed)
    let state = ServerState::initialize(&config).await?;

    // 5. Serve
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
