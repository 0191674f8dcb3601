//! Watch command: a live calendar session.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use console::style;

use advent::present::{HtmlPage, TerminalGrid, TileMount};
use advent::{Config, Session, SystemClock};

use crate::cli::helpers::{format_delay, load_window};

/// Render now, refresh once at the next local midnight, then idle until Ctrl-C.
///
/// The session does not re-arm after its refresh; a second midnight is not
/// picked up without restarting.
pub async fn cmd_watch(config: &Config, html: Option<&Path>) -> anyhow::Result<()> {
    let window = load_window(config)?;

    let mount: Box<dyn TileMount> = match html {
        Some(path) => Box::new(HtmlPage::new(
            path,
            config.site.title.clone(),
            config.site.days_dir.clone(),
        )),
        None => Box::new(TerminalGrid::stdout().live()),
    };

    let mut session = Session::new(window, Arc::new(SystemClock), mount);
    let delay = session
        .initialize()
        .context("Failed to render calendar")?;

    match delay {
        Some(delay) => eprintln!(
            "{} Refresh at next midnight in {} ({})",
            style("⏱").cyan(),
            format_delay(delay),
            window.timezone()
        ),
        None => eprintln!(
            "{} Could not schedule a midnight refresh; calendar will not update",
            style("!").yellow()
        ),
    }

    tokio::select! {
        refreshed = session.wait_for_refresh() => {
            if refreshed.context("Failed to refresh calendar")? {
                eprintln!(
                    "{} Refreshed for the new day; no further refresh scheduled",
                    style("✓").green()
                );
            }
        }
        _ = tokio::signal::ctrl_c() => return Ok(()),
    }

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    Ok(())
}
