use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use carelink::config::GatewayConfig;
use carelink::edge;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    // Startup banner at info level so something always prints at default verbosity
    let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    let cfg = GatewayConfig::from_env();
    info!(
        target: "carelink",
        "carelink edge gate starting: RUST_LOG='{}', edge_port={}, api_origin='{}'",
        rust_log, cfg.edge_port, cfg.api_origin
    );

    edge::run_with_port(cfg.edge_port, edge::placeholder_shell()).await
}
