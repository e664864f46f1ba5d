use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use trek_core::Config;
use trek_server::{AppState, create_router};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "trek-server", version, about = "Weather Trek backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve(ServeArgs),

    /// Store the OpenWeatherMap API key in the config file.
    Configure {
        /// Config file to write instead of the platform default.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration with the API key masked.
    ShowConfig {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Config file to read instead of the platform default.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Interface to bind.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on; overrides `PORT`.
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding weather-data.json and ontario-records.json.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Serve(ServeArgs::default())) {
            Command::Serve(args) => serve(args).await,
            Command::Configure { config } => configure(config),
            Command::ShowConfig { config } => show_config(config),
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// File < environment < flags.
fn resolve_config(args: &ServeArgs) -> anyhow::Result<Config> {
    let mut config = load_config(args.config.as_ref())?;
    config.apply_env()?;

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }

    Ok(config)
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    let state = AppState::from_config(&config)?;
    let live_configured = state.aggregator.is_live_configured();

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener =
        TcpListener::bind(&addr).await.with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{addr}");
    info!(snapshot = %config.snapshot_path().display(), "Fallback snapshot");
    if live_configured {
        info!("OpenWeatherMap API key configured");
    } else {
        info!(
            "OpenWeatherMap API key not set, using JSON fallback. \
             Set OPENWEATHER_API_KEY or run `trek-server configure` to use the live API"
        );
    }

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn configure(path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config(path.as_ref())?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_help_message("Leave empty to always serve the bundled snapshot")
        .prompt()
        .context("Failed to read API key")?;

    let timeout_secs = inquire::CustomType::<u64>::new("Upstream timeout (seconds):")
        .with_default(config.openweather.timeout_secs)
        .prompt()
        .context("Failed to read timeout")?;

    config.openweather.timeout_secs = timeout_secs.max(1);
    if api_key.trim().is_empty() {
        config.openweather.api_key = None;
    } else {
        config.set_api_key(api_key.trim().to_string());
    }

    let written = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Configuration saved to {}", written.display());
    Ok(())
}

fn show_config(path: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = load_config(path.as_ref())?;
    config.apply_env()?;

    let masked = config.api_key().map(mask_key);
    config.openweather.api_key = masked;

    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    println!("{rendered}");
    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("****{tail}")
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["trek-server"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn serve_flags_override_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").expect("write");

        let args = ServeArgs {
            config: Some(path),
            host: Some("127.0.0.1".into()),
            port: Some(5000),
            data_dir: Some(PathBuf::from("/srv/data")),
        };
        let config = resolve_config(&args).expect("config");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.snapshot_path(), PathBuf::from("/srv/data/weather-data.json"));
    }

    #[test]
    fn mask_key_keeps_last_four() {
        assert_eq!(mask_key("abcdef123456"), "****3456");
        assert_eq!(mask_key("ab"), "****ab");
    }
}
