//! Styled terminal grid.

use std::io::Write;

use console::{style, Term};

use super::TileMount;
use crate::error::PresentError;
use crate::grid::RenderedTile;

const DEFAULT_COLUMNS: usize = 6;

/// Prints the calendar as rows of fixed-width cells.
pub struct TerminalGrid<W: Write> {
    out: W,
    columns: usize,
    /// Cleared before each mount when set.
    screen: Option<Term>,
}

impl TerminalGrid<Term> {
    pub fn stdout() -> Self {
        Self::new(Term::stdout())
    }

    /// Clear the screen before each mount when attached to a terminal, so a
    /// refresh replaces the previous grid instead of scrolling below it.
    pub fn live(mut self) -> Self {
        if self.out.is_term() {
            self.screen = Some(self.out.clone());
        }
        self
    }
}

impl<W: Write> TerminalGrid<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            columns: DEFAULT_COLUMNS,
            screen: None,
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell(tile: &RenderedTile) -> String {
        let text = if tile.unlocked {
            format!("[Day {:>2} open ]", tile.index)
        } else {
            format!("[Day {:>2} lock ]", tile.index)
        };
        if tile.unlocked {
            style(text).green().bold().to_string()
        } else {
            style(text).dim().to_string()
        }
    }
}

impl<W: Write> TileMount for TerminalGrid<W> {
    fn mount(&mut self, tiles: &[RenderedTile], status: Option<&str>) -> Result<(), PresentError> {
        if let Some(screen) = &self.screen {
            screen.clear_screen()?;
        }
        if let Some(line) = status {
            writeln!(self.out, "{}", style(line).cyan())?;
        }
        for row in tiles.chunks(self.columns) {
            let cells: Vec<String> = row.iter().map(Self::cell).collect();
            writeln!(self.out, "{}", cells.join(" "))?;
        }
        let unlocked = tiles.iter().filter(|t| t.unlocked).count();
        writeln!(self.out, "{}/{} unlocked", unlocked, tiles.len())?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::CalendarFields;
    use crate::config::ConfiguredWindow;
    use crate::grid::render;

    #[test]
    fn test_terminal_grid_layout() {
        let window = ConfiguredWindow::new(2025, 12, 24, "Europe/Madrid").unwrap();
        let tiles = render(&window, &CalendarFields::date(2025, 12, 8));

        let mut grid = TerminalGrid::new(Vec::new()).with_columns(6);
        grid.mount(&tiles, Some("Current time (Europe/Madrid): test")).unwrap();
        let raw = String::from_utf8(grid.into_inner()).unwrap();
        let text = console::strip_ansi_codes(&raw);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Current time (Europe/Madrid): test");
        // Status, four rows of six, summary.
        assert_eq!(lines.len(), 6);
        assert!(lines[1].starts_with("[Day  1 open ]"));
        assert!(lines[2].contains("[Day  8 open ]"));
        assert!(lines[2].contains("[Day  9 lock ]"));
        assert_eq!(lines[5], "8/24 unlocked");
    }

    #[test]
    fn test_terminal_grid_without_status() {
        let window = ConfiguredWindow::new(2025, 12, 3, "UTC").unwrap();
        let tiles = render(&window, &CalendarFields::date(2025, 11, 1));

        let mut grid = TerminalGrid::new(Vec::new());
        grid.mount(&tiles, None).unwrap();
        let raw = String::from_utf8(grid.into_inner()).unwrap();
        let text = console::strip_ansi_codes(&raw);

        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with("0/3 unlocked\n"));
    }

    #[test]
    fn test_live_clears_only_on_a_terminal() {
        let grid = TerminalGrid::stdout().live();
        assert_eq!(grid.screen.is_some(), Term::stdout().is_term());
        assert!(TerminalGrid::stdout().screen.is_none());
    }

    #[test]
    fn test_writer_output_has_no_clear_sequence() {
        let window = ConfiguredWindow::new(2025, 12, 2, "UTC").unwrap();
        let tiles = render(&window, &CalendarFields::date(2025, 12, 1));

        let mut grid = TerminalGrid::new(Vec::new());
        grid.mount(&tiles, None).unwrap();
        grid.mount(&tiles, None).unwrap();
        let raw = String::from_utf8(grid.into_inner()).unwrap();

        assert!(!raw.contains("\x1b[2J"));
        assert_eq!(console::strip_ansi_codes(&raw).matches("1/2 unlocked").count(), 2);
    }
}
