//! Status command.

use chrono::{DateTime, Utc};

use advent::present::TerminalGrid;
use advent::Config;

use crate::cli::helpers::{clock_for, load_window, render_once};

/// Print the current time and the unlock grid once.
pub fn cmd_status(config: &Config, at: Option<DateTime<Utc>>) -> anyhow::Result<()> {
    let window = load_window(config)?;
    let clock = clock_for(at);
    let mut grid = TerminalGrid::stdout();
    render_once(&window, clock.as_ref(), &mut grid)?;
    Ok(())
}
