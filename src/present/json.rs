//! JSON descriptor dump.

use std::io::Write;

use serde::Serialize;

use super::TileMount;
use crate::error::PresentError;
use crate::grid::RenderedTile;

#[derive(Serialize)]
struct Snapshot<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    unlocked: usize,
    tiles: &'a [RenderedTile],
}

/// Writes one pretty-printed JSON document per mount.
pub struct JsonTiles<W: Write> {
    out: W,
}

impl<W: Write> JsonTiles<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TileMount for JsonTiles<W> {
    fn mount(&mut self, tiles: &[RenderedTile], status: Option<&str>) -> Result<(), PresentError> {
        let snapshot = Snapshot {
            status,
            unlocked: tiles.iter().filter(|t| t.unlocked).count(),
            tiles,
        };
        serde_json::to_writer_pretty(&mut self.out, &snapshot)?;
        writeln!(self.out)?;
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
    fn test_json_snapshot() {
        let window = ConfiguredWindow::new(2025, 12, 24, "Europe/Madrid").unwrap();
        let tiles = render(&window, &CalendarFields::date(2025, 12, 2));

        let mut mount = JsonTiles::new(Vec::new());
        mount.mount(&tiles, Some("label")).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&mount.into_inner()).unwrap();

        assert_eq!(value["status"], "label");
        assert_eq!(value["unlocked"], 2);
        let tiles = value["tiles"].as_array().unwrap();
        assert_eq!(tiles.len(), 24);
        assert_eq!(tiles[1]["target_ref"], "day-02");
        assert_eq!(tiles[2]["index"], 3);
        assert!(tiles[2].get("target_ref").is_none());
    }
}
