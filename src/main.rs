// invchat - conversational query layer over a server-inventory API
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use invchat::chatbot::ServerChatbot;
use invchat::cli::{self, Args, Mode};
use invchat::config::AppConfig;
use invchat::server::create_router;
use invchat::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration, flags last
    let mut config = AppConfig::load_from(args.config.as_deref())?;
    args.apply(&mut config);

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting invchat v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Build the chatbot (connects the Gemini backend when a key is configured)
    let chatbot = ServerChatbot::new(&config).await?;
    info!("{}", chatbot);

    match args.mode() {
        Mode::Query(query) => {
            println!("{}", chatbot.generate_response(&query).await);
        }
        Mode::Health => {
            let report = chatbot.health_check().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Mode::Interactive => {
            let stdin = std::io::stdin();
            cli::run_interactive(&chatbot, stdin.lock(), std::io::stdout()).await?;
        }
        Mode::Serve => serve(config, chatbot).await?,
    }

    Ok(())
}

async fn serve(config: AppConfig, chatbot: ServerChatbot) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, Arc::new(chatbot));

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
