use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchkeeper::api::routes::decks::WinrateParams;
use matchkeeper::api::state::AppState;
use matchkeeper::api::{build_router, cors_layer};
use matchkeeper::calculate::{compute_filtered_winrate, compute_stats};
use matchkeeper::config::AppConfig;
use matchkeeper::storage::{JsonlStore, RecordStore, StorageConfig};

#[derive(Parser)]
#[command(name = "matchkeeper")]
#[command(about = "Trading card game match tracker with deck winrate statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./matchkeeper.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Create the storage layout and exit
    Init,

    /// Print statistics for a deck
    Stats {
        /// Deck ID
        #[arg(long)]
        deck: String,
    },

    /// Print a filtered winrate for a deck
    Winrate {
        /// Deck ID
        #[arg(long)]
        deck: String,

        /// Only matches created at or after this ISO-8601 time
        #[arg(long)]
        from: Option<String>,

        /// Only matches created at or before this ISO-8601 time
        #[arg(long)]
        to: Option<String>,

        /// 1-based game index (match winrate when omitted)
        #[arg(long)]
        game: Option<i64>,

        /// Exclude matches where any game had more mulligans than this
        #[arg(long)]
        player_mulligan_lte: Option<i32>,

        /// Accepted for parity with the HTTP API; not applied
        #[arg(long)]
        opponent_mulligan_lte: Option<i32>,

        /// play, draw or neither
        #[arg(long)]
        play_draw: Option<String>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {:?}", cli.config))?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting matchkeeper v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(JsonlStore::new(StorageConfig::new(config.data_dir.clone())));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            store.init().await?;

            let cors = cors_layer(&config.server.cors_origin)?;
            let app = build_router(AppState::new(store)).layer(cors);

            let addr = config.server.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Init => {
            store.init().await?;
            println!("Initialized record store in {:?}", config.data_dir);
        }
        Commands::Stats { deck } => {
            let found = store
                .get_deck(&deck)
                .await?
                .ok_or_else(|| anyhow!("Deck not found: {}", deck))?;

            let matches = store.fetch_matches_for_deck(&deck, None, None).await?;
            let stats = compute_stats(&matches);

            println!("\n=== {} ===", found.name);
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Winrate {
            deck,
            from,
            to,
            game,
            player_mulligan_lte,
            opponent_mulligan_lte,
            play_draw,
        } => {
            let filter = WinrateParams {
                time_from: from,
                time_to: to,
                game,
                player_mulligan_lte,
                opponent_mulligan_lte,
                play_draw,
            }
            .into_filter()?;

            store
                .get_deck(&deck)
                .await?
                .ok_or_else(|| anyhow!("Deck not found: {}", deck))?;

            let matches = store
                .fetch_matches_for_deck(&deck, filter.time_from, filter.time_to)
                .await?;
            let winrate = compute_filtered_winrate(&matches, &filter);

            println!("Matches fetched: {}", matches.len());
            println!("Winrate:         {:.4}", winrate);
        }
    }

    Ok(())
}
