use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use whiskers::api::{AppState, router};
use whiskers::config::Config;
use whiskers::store::Store;

#[derive(Parser)]
#[command(name = "whiskers")]
#[command(about = "Pet shop catalog API over file-backed JSON collections")]
#[command(version)]
struct Cli {
    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory override (one <collection>.json file per collection)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Bind address override, e.g. 0.0.0.0:8080
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Write demonstration data into empty collections
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }

            let store = Store::open(&config.data_dir)?;
            info!(data_dir = %config.data_dir.display(), "Store opened");

            let bind = config.bind.clone();
            let app = router(AppState::new(store, config));
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!(addr = %bind, "Listening");
            axum::serve(listener, app).await?;
        }
        Commands::Seed => {
            let store = Store::open(&config.data_dir)?;
            whiskers::seed::seed(&store)?;
            println!("Seed data written to {}", config.data_dir.display());
        }
    }

    Ok(())
}
