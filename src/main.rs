use anyhow::Result;
use scoutbase::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!(host = %config.host, port = config.port, "starting scoutbase");

    ServerBuilder::new().with_config(config).serve().await
}
