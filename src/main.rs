use anyhow::Result;
use tracing_subscriber::EnvFilter;
use trek_explorer::config::AppConfig;
use trek_explorer::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(
        bind = %config.server.bind,
        prune_policy = ?config.listing.prune_policy,
        "starting trek explorer"
    );

    ServerBuilder::new(config).serve().await
}
