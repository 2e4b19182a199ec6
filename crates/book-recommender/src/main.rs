mod analysis;
mod catalog;
mod config;
mod dataset;
mod error;
mod evaluation;
mod model;
mod recommend;
mod server;

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use rmcp::{ServiceExt, transport::stdio};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use catalog::Catalog;
use config::Config;
use server::BookRecommenderServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for MCP JSON-RPC in stdio mode
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting book-recommender MCP server");

    let config = Config::from_env()?;
    info!(
        books_path = %config.books_path,
        similarity_path = %config.similarity_path,
        default_limit = config.default_limit,
        max_limit = config.max_limit,
        "configuration loaded"
    );

    // Refuses to start when the CSV and the matrix disagree on size.
    let catalog = Arc::new(Catalog::load(&config)?);
    if catalog.is_empty() {
        warn!("books dataset is empty, every title lookup will report not found");
    }
    info!(books = catalog.len(), "catalog ready");

    let server = BookRecommenderServer::new(catalog, config);

    if let Ok(addr) = std::env::var("MCP_HTTP_LISTEN_ADDR") {
        let service = StreamableHttpService::new(
            move || Ok(server.clone()),
            LocalSessionManager::default().into(),
            Default::default(),
        );
        let router = axum::Router::new().nest_service("/mcp", service);
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving streamable HTTP on /mcp");
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await?;
        info!("MCP server shut down");
    } else if let Ok(addr) = std::env::var("MCP_TCP_LISTEN_ADDR") {
        let listener = TcpListener::bind(&addr).await?;
        info!(listen_addr = %addr, "MCP server ready, serving on TCP");
        loop {
            let (stream, peer) = listener.accept().await?;
            let server = server.clone();
            tokio::spawn(async move {
                info!(peer = %peer, "MCP client connected");
                let service = server.serve(stream).await.inspect_err(|e| {
                    tracing::error!(error = %e, "MCP server error");
                })?;
                service.waiting().await?;
                info!(peer = %peer, "MCP client disconnected");
                Ok::<(), anyhow::Error>(())
            });
        }
    } else {
        info!("MCP server ready, serving on stdio");
        let service = server.serve(stdio()).await.inspect_err(|e| {
            tracing::error!(error = %e, "MCP server error");
        })?;
        service.waiting().await?;
        info!("MCP server shut down");
    }
    Ok(())
}
