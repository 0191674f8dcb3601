//! Shared helper functions for CLI commands.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::{DateTime, Utc};

use advent::clock::now_in;
use advent::present::TileMount;
use advent::status::status_line;
use advent::unlock::unlocked_count;
use advent::{render, Clock, Config, ConfiguredWindow, FixedClock, SystemClock};

/// Parse an RFC 3339 instant from the command line.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp like 2025-12-05T09:00:00Z: {}", e))
}

/// Pinned clock for `--at`, the system clock otherwise.
pub fn clock_for(at: Option<DateTime<Utc>>) -> Arc<dyn Clock> {
    match at {
        Some(instant) => Arc::new(FixedClock::new(instant)),
        None => Arc::new(SystemClock),
    }
}

/// Validate the `[calendar]` section; fatal before anything is rendered.
pub fn load_window(config: &Config) -> anyhow::Result<ConfiguredWindow> {
    config
        .window()
        .context("Invalid [calendar] configuration")
}

/// Status line, grid and mount once, without arming a refresh.
///
/// Returns the number of unlocked items.
pub fn render_once(
    window: &ConfiguredWindow,
    clock: &dyn Clock,
    mount: &mut dyn TileMount,
) -> anyhow::Result<u32> {
    let fields = now_in(clock, window.timezone());
    let status = status_line(&fields, window.timezone());
    let tiles = render(window, &fields);
    mount
        .mount(&tiles, status.as_deref())
        .context("Failed to render calendar")?;
    Ok(unlocked_count(&fields, window))
}

/// Compact duration like `23h 59m 59s`.
pub fn format_delay(delay: Duration) -> String {
    let secs = delay.as_secs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}
