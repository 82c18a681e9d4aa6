//! Product search server entry point.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{extract::Request, middleware::Next};
use backend::{
    config::OpenSearchConfig,
    db_utils::opensearch_utils::OpenSearchClient,
    server_extra::{AppState, build_router},
};
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "product-search", about = "Product search front-end for an OpenSearch catalog index")]
struct Cli {
    /// Address the HTTP server listens on
    #[arg(long, env = "SEARCH_LISTEN", default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// OpenSearch base URL
    #[arg(long, env = "OPENSEARCH_URL", default_value = "https://localhost:9200")]
    opensearch_url: String,

    /// Index holding the product catalog
    #[arg(long, env = "OPENSEARCH_INDEX", default_value = "bbuy_products")]
    index: String,

    #[arg(long, env = "OPENSEARCH_USER")]
    user: Option<String>,

    #[arg(long, env = "OPENSEARCH_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Verify the backend's TLS certificate
    #[arg(long, env = "OPENSEARCH_VERIFY_CERTS")]
    verify_certs: bool,

    /// Backend request timeout in seconds
    #[arg(long, env = "OPENSEARCH_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

impl Cli {
    fn opensearch_config(&self) -> OpenSearchConfig {
        OpenSearchConfig {
            url: self.opensearch_url.clone(),
            index: self.index.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
            accept_invalid_certs: !self.verify_certs,
            timeout_secs: self.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.opensearch_config();
    let client = OpenSearchClient::new(&config).context("Failed to create search backend client")?;
    info!("Searching {}", client.search_url());

    let router = build_router(Arc::new(AppState::new(client))).layer(axum::middleware::from_fn(
        |request: Request, next: Next| async move {
            let method = request.method().clone();
            let path = request.uri().path().to_string();
            let res = next.run(request).await;
            tracing::debug!("{} {} -> {}", method, path, res.status());
            res
        },
    ));

    let listener = tokio::net::TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("Failed to bind {}", cli.listen))?;
    info!("Listening on http://{}", cli.listen);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutting down");
}
