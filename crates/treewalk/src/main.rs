use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use treewalk::config::ServerConfig;
use treewalk::server::Server;

/// Incremental directory tree crawler.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on, overrides the config file.
    #[arg(short, long)]
    listen: Option<String>,

    /// Path to a JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match ServerConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(%error, "failed to load configuration");
            std::process::exit(1);
        }
    };
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    let mut server = match Server::new(config).await {
        Ok(server) => server,
        Err(error) => {
            tracing::error!(%error, "failed to start server");
            std::process::exit(1);
        }
    };

    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to wait for shutdown signal");
    }
    tracing::info!("shutting down");
    let _ = server.shutdown();
}
