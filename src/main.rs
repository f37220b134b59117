use cashmemo_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv + logging)
    dotenv::dotenv().ok();
    init_logger();

    print_banner();

    tracing::info!("Cashmemo Server starting...");

    // 2. Load config
    let config = Config::from_env();

    // 3. Initialize server state (work dir, database, JWT service)
    let state = ServerState::initialize(&config).await?;

    // 4. Run the HTTP server
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
