//! Unlock policy.
//!
//! Items unlock by comparing `(year, month, day)` lexicographically against
//! `(start_year, start_month, index)`. Once the configured month has passed,
//! every item stays unlocked; nothing ever re-locks.

use crate::clock::CalendarFields;
use crate::config::ConfiguredWindow;

/// Whether item `index` (1-based) is unlocked at `fields`.
///
/// Pure and total over valid indices; time only enters through `fields`.
/// An `index` outside `1..=window.item_count()` is a caller bug.
pub fn is_unlocked(index: u32, fields: &CalendarFields, window: &ConfiguredWindow) -> bool {
    debug_assert!(
        (1..=window.item_count()).contains(&index),
        "item index {} outside 1..={}",
        index,
        window.item_count()
    );

    if fields.year != window.start_year() {
        return fields.year > window.start_year();
    }
    if fields.month != window.start_month() {
        return fields.month > window.start_month();
    }
    fields.day >= index
}

/// Number of unlocked items. Unlocking is prefix-closed, so these are items
/// `1..=unlocked_count`.
pub fn unlocked_count(fields: &CalendarFields, window: &ConfiguredWindow) -> u32 {
    (1..=window.item_count())
        .take_while(|index| is_unlocked(*index, fields, window))
        .count() as u32
}
