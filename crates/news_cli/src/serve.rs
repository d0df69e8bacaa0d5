use std::net::SocketAddr;

use anyhow::Context;
use clap::Args;
use news_rpc::NewsServer;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "NEWS_ADDR", default_value = "127.0.0.1:8080")]
    pub addr: SocketAddr,
    /// Shared secret expected in the `authorization` metadata
    #[arg(long, env = "NEWS_AUTH_TOKEN")]
    pub auth_token: Option<String>,
    /// Storage backend
    #[arg(long, env = "NEWS_STORAGE", default_value = "memory")]
    pub storage: String,
}

pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    let storage = news_storage::create_storage(&args.storage)?;

    let listener = TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    let local_addr = listener.local_addr()?;

    info!(addr = %local_addr, "🚀 starting gRPC server");
    NewsServer::new(storage)
        .with_auth_token(args.auth_token)
        .serve(listener, shutdown_signal())
        .await
        .context("gRPC server failed")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(e) => {
            tracing::error!(error = %e, "failed to listen for ctrl-c, running until killed");
            std::future::pending::<()>().await;
        }
    }
}
