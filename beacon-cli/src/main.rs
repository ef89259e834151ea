use anyhow::{Context, Result};
use beacon_server::ServerConfig;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Signaling and room coordination for one-to-many WebRTC broadcasts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling server.
    Serve(ConfigArgs),

    /// Print the effective configuration as TOML and exit.
    Config(ConfigArgs),
}

#[derive(clap::Args, Default)]
struct ConfigArgs {
    /// TOML file with server settings.
    #[arg(short, long, env = "BEACON_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "BEACON_BIND")]
    bind: Option<String>,

    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Answer ids remembered before eviction.
    #[arg(long, env = "BEACON_DEDUP_CAPACITY")]
    dedup_capacity: Option<usize>,

    /// Oldest answer ids dropped per eviction pass.
    #[arg(long, env = "BEACON_DEDUP_EVICT")]
    dedup_evict: Option<usize>,

    /// Seconds between WebSocket pings.
    #[arg(long, env = "BEACON_HEARTBEAT_INTERVAL")]
    heartbeat_interval: Option<u64>,

    /// Seconds of silence before a socket is dropped.
    #[arg(long, env = "BEACON_HEARTBEAT_TIMEOUT")]
    heartbeat_timeout: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, env = "BEACON_LOG")]
    log_level: Option<String>,
}

impl ConfigArgs {
    /// File settings first, then flags and env vars on top.
    fn resolve(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_address = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(capacity) = self.dedup_capacity {
            config.hub.dedup_capacity = capacity;
        }
        if let Some(evict) = self.dedup_evict {
            config.hub.dedup_evict_batch = evict;
        }
        if let Some(interval) = self.heartbeat_interval {
            config.heartbeat_interval_secs = interval;
        }
        if let Some(timeout) = self.heartbeat_timeout {
            config.heartbeat_timeout_secs = timeout;
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            let config = args.resolve()?;
            init_tracing(&config.log_level);

            println!("{}", "📡 Beacon signaling server".green().bold());
            println!("   🔌 WebSocket: ws://{}/ws", config.socket_addr()?);
            println!("   📊 Stats:     http://{}/stats", config.socket_addr()?);

            beacon_server::serve(config, shutdown_signal()).await?;
        }
        Commands::Config(args) => {
            let config = args.resolve()?;
            let text = toml::to_string_pretty(&config).context("failed to render config")?;
            print!("{text}");
        }
    }

    Ok(())
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            eprintln!("{} {}", "Failed to listen for Ctrl+C:".red(), e);
            std::future::pending::<()>().await;
        }
    }
}
