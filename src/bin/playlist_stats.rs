//! # Playlist Stats CLI
//!
//! Analyse a playlist URL, browse the local history and print share links.
//!
//! Usage: `cargo run --bin playlist-stats -- analyze "https://www.youtube.com/playlist?list=..."`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use playlist_stats::core::{Config, PipelineError};
use playlist_stats::features::history::{FileStorage, SnapshotCache};
use playlist_stats::features::playlist::{validate_input, PlaylistPipeline, YouTubeCatalog, DEFAULT_LONGEST_LIMIT};
use playlist_stats::features::report::{render_embed_card, render_history, render_report};
use playlist_stats::features::share::ShareLinks;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the analysis history
    #[arg(long, env = "PLAYLIST_HISTORY_PATH")]
    history: Option<PathBuf>,

    /// Origin used when printing share and embed links
    #[arg(long, env = "SHARE_BASE_URL")]
    share_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a playlist URL (served from history when already analysed)
    Analyze {
        /// Playlist URL or anything containing `list=...`
        input: String,

        /// Ignore history and fetch fresh data
        #[arg(long)]
        refresh: bool,

        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,

        /// Number of longest videos to list
        #[arg(long, default_value_t = DEFAULT_LONGEST_LIMIT)]
        top: usize,
    },
    /// List previously analysed playlists
    History {
        #[arg(long)]
        json: bool,
    },
    /// Forget every analysed playlist
    ClearHistory,
    /// Print share links and the embed snippet for a playlist id
    Share { id: String },
    /// Print the compact embed card for a playlist id
    Embed { id: String },
}

/// Attach a user-facing message, plus a retry hint when the catalog was unreachable
fn explain(err: PipelineError, message: &str) -> anyhow::Error {
    if err.is_retryable() {
        eprintln!("The catalog could not be reached. Run the command again to retry.");
    }
    anyhow::Error::new(err).context(message.to_string())
}

fn build_pipeline(config: &Config, cache: Arc<SnapshotCache>) -> Result<PlaylistPipeline> {
    let catalog = YouTubeCatalog::from_config(config).context("Cannot reach the playlist catalog")?;
    Ok(PlaylistPipeline::new(Arc::new(catalog), cache))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let args = Args::parse();
    let mut config = Config::from_env()?;
    if let Some(path) = args.history {
        config.history_path = path;
    }
    if let Some(base) = args.share_base_url {
        config.share_base_url = base.trim_end_matches('/').to_string();
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .init();

    let storage = FileStorage::new(config.history_path.clone());
    info!("Using history file {}", storage.path().display());
    let cache = Arc::new(SnapshotCache::new(Arc::new(storage)));

    match args.command {
        Command::Analyze {
            input,
            refresh,
            json,
            top,
        } => {
            // Reject bad input before asking for credentials
            let id = validate_input(&input)?;
            let pipeline = build_pipeline(&config, cache)?;

            eprintln!("Analyzing playlist {}...", id);
            let snapshot = pipeline
                .analyze_input(&input, refresh)
                .await
                .map_err(|e| explain(e, "Failed to load playlist data. Please check the URL and try again"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let links = ShareLinks::new(&config.share_base_url, &snapshot.id);
                print!("{}", render_report(&snapshot, &links, top));
            }
        }
        Command::History { json } => {
            let history = cache.get_all();
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                print!("{}", render_history(&history));
            }
        }
        Command::ClearHistory => {
            cache.clear();
            println!("Playlist history cleared");
        }
        Command::Share { id } => {
            let links = ShareLinks::new(&config.share_base_url, &id);
            println!("Link:    {}", links.share_url);
            println!("Embed:   {}", links.embed_url);
            println!("Catalog: {}", links.catalog_url);
            println!("\n{}", links.embed_code);
        }
        Command::Embed { id } => {
            let snapshot = match cache.get_by_id(&id) {
                Some(snapshot) => snapshot,
                None => {
                    let pipeline = build_pipeline(&config, cache.clone())?;
                    eprintln!("Loading playlist data...");
                    pipeline
                        .try_resolve_playlist(&id)
                        .await
                        .map_err(|e| explain(e, "The playlist could not be loaded or doesn't exist"))?
                }
            };
            let links = ShareLinks::new(&config.share_base_url, &snapshot.id);
            print!("{}", render_embed_card(&snapshot, &links));
        }
    }

    Ok(())
}
