//! One-shot render command.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use console::style;

use advent::present::{HtmlPage, JsonTiles, TerminalGrid, TileMount};
use advent::Config;

use super::RenderFormat;
use crate::cli::helpers::{clock_for, load_window, render_once};

/// Render the calendar once to the chosen mount.
pub fn cmd_render(
    config: &Config,
    format: RenderFormat,
    out: Option<&Path>,
    at: Option<DateTime<Utc>>,
) -> anyhow::Result<()> {
    let window = load_window(config)?;
    let clock = clock_for(at);

    let mut mount: Box<dyn TileMount> = match (format, out) {
        (RenderFormat::Html, _) => {
            let path = out
                .map(Path::to_path_buf)
                .unwrap_or_else(|| config.resolve_path(&config.site.output));
            Box::new(HtmlPage::new(
                path,
                config.site.title.clone(),
                config.site.days_dir.clone(),
            ))
        }
        (RenderFormat::Json, Some(path)) => Box::new(JsonTiles::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ))),
        (RenderFormat::Json, None) => Box::new(JsonTiles::new(std::io::stdout())),
        (RenderFormat::Text, Some(path)) => Box::new(TerminalGrid::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        ))),
        (RenderFormat::Text, None) => Box::new(TerminalGrid::stdout()),
    };

    let unlocked = render_once(&window, clock.as_ref(), mount.as_mut())?;

    if format == RenderFormat::Html || out.is_some() {
        let target = out
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.resolve_path(&config.site.output));
        eprintln!(
            "{} Rendered {}/{} unlocked to {}",
            style("✓").green(),
            unlocked,
            window.item_count(),
            target.display()
        );
    }
    Ok(())
}
