//! Mount points that materialize rendered tiles.
//!
//! - `html`: static calendar page via askama
//! - `terminal`: styled grid for the CLI
//! - `json`: descriptor dump for other tooling
//!
//! Every mount replaces its whole previous output; nothing accumulates
//! across re-renders.

mod html;
mod json;
mod terminal;

pub use html::{page_href, HtmlPage};
pub use json::JsonTiles;
pub use terminal::TerminalGrid;

use crate::error::PresentError;
use crate::grid::RenderedTile;

/// A rendering target for the tile sequence.
pub trait TileMount {
    /// Replace the current representation with `tiles` and an optional status line.
    fn mount(&mut self, tiles: &[RenderedTile], status: Option<&str>) -> Result<(), PresentError>;
}

impl<M: TileMount + ?Sized> TileMount for Box<M> {
    fn mount(&mut self, tiles: &[RenderedTile], status: Option<&str>) -> Result<(), PresentError> {
        (**self).mount(tiles, status)
    }
}
