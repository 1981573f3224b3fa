mod app;
mod artwork;
mod config;
mod greeting;
mod http;
mod input;
mod lyrics;
mod poller;
mod reconcile;
mod scrobble;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use poller::{LyricsOutcome, Poller, Supplement};
use std::str::FromStr;
use std::sync::Mutex;

#[derive(Debug, Parser)]
#[command(name = "nowplaying", version, about = "Now playing from your scrobble history")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the interactive TUI (default).
    Tui,
    /// Run a single pass and print the result (headless).
    Once,
    /// Dump the raw history JSON to stdout (headless).
    HistoryJson,
    /// Resolve cover art for a track and print the URL (headless).
    Artwork {
        artist: String,
        title: String,
        #[arg(long)]
        album: Option<String>,
    },
    /// Look up lyrics for a track and print them (headless).
    Lyrics { artist: String, title: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let command = cli.command.unwrap_or(Command::Tui);

    init_logging(&cfg.log, matches!(command, Command::Tui))?;
    if let Some(hint) = cfg.history.setup_hint() {
        tracing::warn!("history endpoint not configured: {hint}");
    }

    let http = http::client()?;

    match command {
        Command::Tui => {
            let poller = Poller::from_config(&cfg, &http);
            let mut terminal = tui::TerminalGuard::enter(cfg.ui.mouse).context("init terminal")?;
            let mut app = app::App::new(cfg, poller);
            app.run(terminal.terminal_mut()).await?;
        }
        Command::Once => {
            let poller = Poller::from_config(&cfg, &http);
            let outcome = poller.run_pass(None).await?;
            let now = &outcome.snapshot.now_playing;
            let state = if now.is_now_playing { "now playing" } else { "last played" };
            println!("{} - {} ({state})", now.title, now.artist);
            if !app::state::album_hidden(&now.album, &now.title) {
                println!("  in {}", now.album);
            }
            let mut covers = Vec::new();
            if let Supplement::Refreshed {
                artwork,
                lyrics,
                previous_art,
            } = &outcome.supplement
            {
                covers = previous_art.iter().map(|(_, art)| art.as_str()).collect();
                println!("  art: {artwork}");
                let lyrics = match lyrics {
                    LyricsOutcome::Found(l) => format!("{} lines", l.display_lines().len()),
                    LyricsOutcome::NotFound => "not found".to_string(),
                    LyricsOutcome::Disabled => "disabled".to_string(),
                };
                println!("  lyrics: {lyrics}");
            }
            if !outcome.snapshot.previous.is_empty() {
                println!("previously played:");
                for (i, t) in outcome.snapshot.previous.iter().enumerate() {
                    println!("{:02}. {} - {}", i + 1, t.title, t.artist);
                    if let Some(art) = covers.get(i) {
                        println!("    art: {art}");
                    }
                }
            }
        }
        Command::HistoryJson => {
            let client = scrobble::HistoryClient::new(http, cfg.history.request_url());
            let v = client.fetch_raw().await?;
            println!("{}", serde_json::to_string_pretty(&v)?);
        }
        Command::Artwork {
            artist,
            title,
            album,
        } => {
            let resolver = artwork::ArtworkResolver::from_config(&cfg.artwork, &http);
            let track = scrobble::Track {
                title,
                artist,
                album: album.unwrap_or_default(),
                timestamp: None,
                is_now_playing: false,
                source_url: String::new(),
                thumbnail: None,
            };
            println!("{}", resolver.resolve(&track).await);
        }
        Command::Lyrics { artist, title } => {
            let client = lyrics::LrclibClient::new(http, cfg.lyrics.base_url.clone());
            match client.find(&artist, &title).await? {
                Some(found) => {
                    for line in found.display_lines() {
                        println!("{line}");
                    }
                }
                None => println!("{}", app::state::LYRICS_NOT_FOUND),
            }
        }
    }

    Ok(())
}

/// The TUI owns the terminal, so its logs go to a file; headless commands log to stderr.
fn init_logging(cfg: &config::LogConfig, to_file: bool) -> anyhow::Result<()> {
    let level = tracing::Level::from_str(&cfg.level)
        .with_context(|| format!("invalid log level {:?}", cfg.level))?;
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_max_level(level);

    if to_file {
        if let Some(parent) = cfg.file.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&cfg.file)
            .with_context(|| format!("open log file {}", cfg.file.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}
