//! Grid renderer: unlock state to an ordered, immutable tile sequence.
//!
//! The renderer never touches a display. Mount points in [`crate::present`]
//! materialize the returned tiles.

use serde::Serialize;

use crate::clock::CalendarFields;
use crate::config::ConfiguredWindow;
use crate::unlock::is_unlocked;

/// One rendered item: a link to its content when unlocked, inert otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTile {
    pub index: u32,
    pub unlocked: bool,
    /// `day-NN` reference to the item's content page, present only when unlocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_ref: Option<String>,
}

impl RenderedTile {
    pub fn is_interactive(&self) -> bool {
        self.target_ref.is_some()
    }
}

/// Content reference for an item: `day-` plus the index zero-padded to 2 digits.
///
/// # Panics
/// Panics on index 0; items are 1-based.
pub fn day_ref(index: u32) -> String {
    assert!(index >= 1, "item indices start at 1");
    format!("day-{:02}", index)
}

/// Build the tile for a single item.
///
/// # Panics
/// Panics if `index` is outside `1..=window.item_count()`.
pub fn tile(index: u32, fields: &CalendarFields, window: &ConfiguredWindow) -> RenderedTile {
    assert!(
        (1..=window.item_count()).contains(&index),
        "item index {} outside 1..={}",
        index,
        window.item_count()
    );

    let unlocked = is_unlocked(index, fields, window);
    RenderedTile {
        index,
        unlocked,
        target_ref: unlocked.then(|| day_ref(index)),
    }
}

/// Render every item in ascending index order.
///
/// Identical inputs always produce an identical sequence.
pub fn render(window: &ConfiguredWindow, fields: &CalendarFields) -> Vec<RenderedTile> {
    (1..=window.item_count())
        .map(|index| tile(index, fields, window))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advent_2025() -> ConfiguredWindow {
        ConfiguredWindow::new(2025, 12, 24, "Europe/Madrid").unwrap()
    }

    #[test]
    fn test_day_ref_padding() {
        assert_eq!(day_ref(1), "day-01");
        assert_eq!(day_ref(9), "day-09");
        assert_eq!(day_ref(24), "day-24");
    }

    #[test]
    fn test_render_mid_window() {
        let tiles = render(&advent_2025(), &CalendarFields::date(2025, 12, 5));
        assert_eq!(tiles.len(), 24);

        let indices: Vec<u32> = tiles.iter().map(|t| t.index).collect();
        assert_eq!(indices, (1..=24).collect::<Vec<_>>());

        for tile in &tiles[..5] {
            assert!(tile.unlocked);
            assert_eq!(tile.target_ref.as_deref(), Some(day_ref(tile.index).as_str()));
        }
        for tile in &tiles[5..] {
            assert!(!tile.unlocked);
            assert!(!tile.is_interactive());
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let window = advent_2025();
        let fields = CalendarFields::date(2025, 12, 13);
        assert_eq!(render(&window, &fields), render(&window, &fields));
    }

    #[test]
    fn test_render_all_unlocked_after_window() {
        let tiles = render(&advent_2025(), &CalendarFields::date(2026, 1, 1));
        assert!(tiles.iter().all(|t| t.unlocked));
        assert_eq!(tiles[23].target_ref.as_deref(), Some("day-24"));
    }

    #[test]
    fn test_render_all_locked_before_window() {
        let tiles = render(&advent_2025(), &CalendarFields::date(2025, 11, 30));
        assert!(tiles.iter().all(|t| !t.unlocked && t.target_ref.is_none()));
    }

    #[test]
    fn test_single_item_window() {
        let window = ConfiguredWindow::new(2025, 12, 1, "UTC").unwrap();
        let tiles = render(&window, &CalendarFields::date(2025, 12, 1));
        assert_eq!(
            tiles,
            vec![RenderedTile {
                index: 1,
                unlocked: true,
                target_ref: Some("day-01".to_string()),
            }]
        );
    }

    #[test]
    fn test_locked_tile_serializes_without_target() {
        let tiles = render(&advent_2025(), &CalendarFields::date(2025, 12, 1));
        let json = serde_json::to_value(&tiles[..2]).unwrap();
        assert_eq!(json[0]["target_ref"], "day-01");
        assert!(json[1].get("target_ref").is_none());
        assert_eq!(json[1]["unlocked"], false);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_tile_out_of_range_panics() {
        tile(25, &CalendarFields::date(2025, 12, 1), &advent_2025());
    }

    #[test]
    #[should_panic(expected = "start at 1")]
    fn test_day_ref_zero_panics() {
        day_ref(0);
    }
}
