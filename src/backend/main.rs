//! Adboard Server Entry Point
//!
//! Initializes tracing, loads configuration, connects the database, and
//! serves the axum application.

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = adboard::backend::server::config::ServerConfig::from_env()?;
    let pool = adboard::backend::server::config::connect_database(&config).await?;

    let app = adboard::backend::server::init::create_app(pool);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
