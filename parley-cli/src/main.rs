use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use parley::server::{RelayConfig, SignalingService, router};

#[derive(Parser)]
#[command(name = "parley-relay")]
#[command(about = "Room-scoped WebRTC signaling relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Accept WebSocket clients and relay signaling within rooms.
    Serve {
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        #[arg(short, long, env = "PORT", default_value_t = 8000)]
        port: u16,

        /// Notifications buffered per client before it is dropped.
        #[arg(long, default_value_t = 64)]
        send_queue: usize,

        /// Requests buffered in front of the relay engine.
        #[arg(long, default_value_t = 1024)]
        command_queue: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "parley=info,parley_server=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            send_queue,
            command_queue,
        } => {
            let config = RelayConfig {
                send_queue_capacity: send_queue,
                command_queue_capacity: command_queue,
            };
            serve(&host, port, config).await?;
        }
    }

    Ok(())
}

async fn serve(host: &str, port: u16, config: RelayConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    info!("Initializing relay ({:?})", config);
    let service = SignalingService::start(config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = router(service).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!(
        "{} {}",
        "📡 Signaling relay listening on".green().bold(),
        format!("ws://{}/ws/{{room_code}}", addr).cyan()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
