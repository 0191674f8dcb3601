//! Static calendar page.

use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;

use super::TileMount;
use crate::error::PresentError;
use crate::grid::RenderedTile;

/// Helper struct for tile cells in the page.
pub struct TileView {
    pub index: u32,
    pub unlocked: bool,
    pub href: String,
}

/// Calendar page.
#[derive(Template)]
#[template(path = "calendar.html")]
pub struct CalendarTemplate<'a> {
    pub title: &'a str,
    pub status: Option<String>,
    pub tiles: Vec<TileView>,
}

/// Link from the calendar page to an item's content page.
pub fn page_href(days_dir: &str, target_ref: &str) -> String {
    let days_dir = days_dir.trim_end_matches('/');
    if days_dir.is_empty() {
        format!("{}.html", target_ref)
    } else {
        format!("{}/{}.html", days_dir, target_ref)
    }
}

/// Writes the calendar as a standalone HTML file, overwriting it on every mount.
#[derive(Debug, Clone)]
pub struct HtmlPage {
    path: PathBuf,
    title: String,
    days_dir: String,
}

impl HtmlPage {
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>, days_dir: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            days_dir: days_dir.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the page markup without writing it.
    pub fn render(&self, tiles: &[RenderedTile], status: Option<&str>) -> Result<String, PresentError> {
        let template = CalendarTemplate {
            title: &self.title,
            status: status.map(str::to_string),
            tiles: tiles
                .iter()
                .map(|tile| TileView {
                    index: tile.index,
                    unlocked: tile.unlocked,
                    href: tile
                        .target_ref
                        .as_deref()
                        .map(|target| page_href(&self.days_dir, target))
                        .unwrap_or_default(),
                })
                .collect(),
        };
        Ok(template.render()?)
    }
}

impl TileMount for HtmlPage {
    fn mount(&mut self, tiles: &[RenderedTile], status: Option<&str>) -> Result<(), PresentError> {
        let html = self.render(tiles, status)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, html)?;
        tracing::info!("Wrote calendar page {}", self.path.display());
        Ok(())
    }
}
