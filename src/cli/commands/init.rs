//! Initialize command.

use std::path::{Path, PathBuf};

use anyhow::Context;
use console::style;

use advent::config::{Config, CONFIG_FILE_NAME};

/// Write a default `advent.toml`.
pub fn cmd_init(config_path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let contents = Config::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} Wrote {}", style("✓").green(), path.display());
    println!("  Set [calendar] start_year, start_month and timezone for your calendar");
    Ok(())
}
