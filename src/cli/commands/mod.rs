//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod embed;
mod init;
mod render;
mod status;
mod watch;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use advent::Config;

use super::helpers::parse_instant;

/// Output format for one-shot rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RenderFormat {
    /// Standalone HTML calendar page
    #[default]
    Html,
    /// Tile descriptors as JSON
    Json,
    /// Styled terminal grid
    Text,
}

#[derive(Parser)]
#[command(name = "advent")]
#[command(about = "Date-unlocked advent calendar")]
#[command(version)]
pub struct Cli {
    /// Config file path (defaults to ./advent.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default advent.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the current time and unlock state
    Status {
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },

    /// Render the calendar once
    Render {
        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: RenderFormat,
        /// Output file (html defaults to [site].output, others to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Evaluate at this RFC 3339 instant instead of now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },

    /// Render now and again at the next local midnight
    Watch {
        /// Keep this HTML page fresh instead of drawing in the terminal
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Inline images into day pages as data URIs
    Embed {
        /// Directory of HTML pages (defaults to [embed].pages_dir)
        #[arg(long)]
        pages: Option<PathBuf>,
        /// Directory of images (defaults to [embed].images_dir)
        #[arg(long)]
        images: Option<PathBuf>,
        /// Report what would change without writing pages
        #[arg(long)]
        dry_run: bool,
    },
}

pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref();
    let load_config =
        || Config::load(config_path).context("Failed to load configuration");

    match cli.command {
        // Init must work without (or over) an existing config file.
        Commands::Init { force } => init::cmd_init(config_path, force),
        Commands::Status { at } => status::cmd_status(&load_config()?, at),
        Commands::Render { format, out, at } => {
            render::cmd_render(&load_config()?, format, out.as_deref(), at)
        }
        Commands::Watch { html } => watch::cmd_watch(&load_config()?, html.as_deref()).await,
        Commands::Embed {
            pages,
            images,
            dry_run,
        } => embed::cmd_embed(&load_config()?, pages.as_deref(), images.as_deref(), dry_run),
    }
}
