//! voxplay - voice-driven music player, text console
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voxplay_catalog::LibraryCatalog;
use voxplay_console::{
    config::AppConfig,
    engine::SimulatedEngine,
    session::{Reply, Session},
};
use voxplay_core::CatalogGateway;
use voxplay_playback::{command_phrases, Controller};

#[derive(Parser)]
#[command(name = "voxplay")]
#[command(about = "Voice-driven music player (text console)", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Library cache directory (overrides configuration)
    #[arg(short, long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session
    Run,
    /// List cached playlists
    Playlists,
    /// List recognized player phrases
    Commands,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "voxplay=info,voxplay_console=info,voxplay_playback=info,voxplay_catalog=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(library) = cli.library {
        config.library.path = library;
    }
    config.validate()?;

    match cli.command {
        Commands::Run => run(&config)?,
        Commands::Playlists => list_playlists(&config)?,
        Commands::Commands => list_commands(),
    }

    Ok(())
}

fn open_library(config: &AppConfig) -> anyhow::Result<LibraryCatalog> {
    LibraryCatalog::open(&config.library.path).with_context(|| {
        format!(
            "Failed to open library cache at {}",
            config.library.path.display()
        )
    })
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = Arc::new(open_library(config)?);
    let engine = Arc::new(SimulatedEngine::new(config.engine.track_length()));

    let (controller, pump) = Controller::new(
        Arc::clone(&catalog) as Arc<dyn CatalogGateway>,
        engine,
        config.playback.clone(),
    );
    thread::Builder::new()
        .name("event-pump".to_string())
        .spawn(move || pump.run())
        .context("Failed to spawn event pump thread")?;

    tracing::info!("Starting voxplay session");
    println!("Say something (\"help\" for commands, \"exit\" to quit)");

    let mut session = Session::new(controller.clone());
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let reply = session.handle(&line);
        for announcement in session.announcements() {
            println!("{announcement}");
        }
        match reply {
            Reply::Say(sentence) => println!("{sentence}"),
            Reply::Silent => {}
            Reply::Exit => break,
        }
    }

    controller.stop();
    catalog
        .flush(&config.library.path)
        .context("Failed to save play counts")?;
    tracing::info!("Play counts saved");

    Ok(())
}

fn list_playlists(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = open_library(config)?;

    for playlist in catalog.playlists() {
        println!("{} ({} tracks)", playlist.name, playlist.len());
    }
    Ok(())
}

fn list_commands() {
    println!("play <playlist>");
    for phrase in command_phrases() {
        println!("{phrase}");
    }
}
