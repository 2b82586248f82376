//! render-gateway
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                RENDER GATEWAY                 │
//!   Client Request   │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│ axum   │──▶│ gateway  │──▶│  renderer  │──┼──▶ Renderer
//!                    │  │ server │   │ pipeline │   │  upstream  │  │
//!                    │  └────────┘   └────┬─────┘   └────────────┘  │
//!                    │                    │                          │
//!                    │                    ▼                          │
//!                    │              ┌───────────┐                    │
//!                    │              │content API│────────────────────┼──▶ GraphQL
//!                    │              └───────────┘                    │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use render_gateway::config::{apply_env, load_config, resolve_port, GatewayConfig};
use render_gateway::content_api::http_client_factory;
use render_gateway::gateway::Gateway;
use render_gateway::http::HttpServer;
use render_gateway::lifecycle::{spawn_signal_handler, Shutdown};
use render_gateway::observability::{logging, metrics};
use render_gateway::render::UpstreamRenderer;

#[derive(Parser, Debug)]
#[command(name = "render-gateway", version, about = "Content-aware gateway in front of a page renderer")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overridden by PORT)
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    apply_env(&mut config);
    config.listener.port = resolve_port(
        std::env::var("PORT").ok().as_deref(),
        cli.port,
        config.listener.port,
    );

    logging::init_logging(&config.observability);
    tracing::info!("render-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let port = config.listener.port;
    let bind_address = config.listener.bind_address();
    let renderer = Arc::new(UpstreamRenderer::new(&config.renderer.upstream)?);
    let factory = http_client_factory(config.content_api.endpoint.clone());

    tracing::info!(
        bind_address = %bind_address,
        renderer = %config.renderer.upstream,
        content_api = config.features.use_website_api,
        "Configuration loaded"
    );

    let gateway = Gateway::builder(config)
        .renderer(renderer)
        .content_api_factory(factory)
        .build()?;
    gateway.prepare().await?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening at http://localhost:{port}");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    spawn_signal_handler(shutdown);

    HttpServer::new(Arc::new(gateway)).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
