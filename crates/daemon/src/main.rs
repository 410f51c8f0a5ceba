#![forbid(unsafe_code)]

//! tasklist daemon: serves the task collection over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tasklist_daemon::{config::DaemonConfig, http, TaskService};
use tasklist_storage::{InMemoryStore, JsonFileStore, TaskStore};
use tokio::{net::TcpListener, signal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "tasklist-daemon", version, about = "Task list HTTP API backed by a JSON file")]
struct Cli {
    /// Listen address, e.g. 127.0.0.1:3000
    #[arg(long, default_value = "127.0.0.1:3000")]
    listen: SocketAddr,

    /// JSON file holding the task collection. Created on first write.
    #[arg(long, default_value = "server/data/tasks.json")]
    data_file: PathBuf,

    /// Keep tasks in memory only (nothing survives a restart).
    #[arg(long, default_value_t = false)]
    in_memory: bool,

    /// Log level (env-filter syntax).
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::new(&cli.log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DaemonConfig {
        listen: cli.listen,
        data_file: cli.data_file,
        in_memory: cli.in_memory,
    };
    info!(?config, "starting daemon");

    let listener = TcpListener::bind(config.listen).await?;
    if config.in_memory {
        serve(listener, InMemoryStore::new()).await
    } else {
        serve(listener, JsonFileStore::new(&config.data_file)).await
    }
}

async fn serve<S: TaskStore>(listener: TcpListener, store: S) -> anyhow::Result<()> {
    let app = http::router(Arc::new(TaskService::new(store)));

    info!(listen = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
