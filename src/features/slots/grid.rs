//! Slot grid layout.
//!
//! Slots are stored sparsely; the storefront always renders full rows, so
//! missing positions are filled with virtual empty cells.

use std::collections::BTreeMap;

/// Position of a stored slot inside a category grid
pub trait GridSlot {
    fn row_number(&self) -> i32;
    fn slot_number(&self) -> i32;
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplaySlot<S> {
    Stored(S),
    /// Empty, purchasable position with id `virtual-{row}-{pos}`
    Virtual {
        id: String,
        row_number: i32,
        slot_number: i32,
    },
}

impl<S> DisplaySlot<S> {
    pub fn is_virtual(&self) -> bool {
        matches!(self, DisplaySlot::Virtual { .. })
    }
}

fn row_of<S: GridSlot>(slot: &S) -> i32 {
    let row = slot.row_number();
    if row > 0 {
        row
    } else {
        1
    }
}

/// Bucket slots by row (ascending); within a row order by position.
pub fn group_by_row<S: GridSlot>(slots: Vec<S>) -> BTreeMap<i32, Vec<S>> {
    let mut rows: BTreeMap<i32, Vec<S>> = BTreeMap::new();
    for slot in slots {
        rows.entry(row_of(&slot)).or_default().push(slot);
    }
    for row in rows.values_mut() {
        row.sort_by_key(|s| s.slot_number());
    }
    rows
}

/// Exactly `max_slots` cells for positions `1..=max_slots`.
///
/// Stored slots outside that range are not displayed. When two stored slots
/// claim the same position the first one wins.
pub fn build_display_slots<S: GridSlot + Clone>(
    row_slots: &[S],
    row_number: i32,
    max_slots: u32,
) -> Vec<DisplaySlot<S>> {
    let max = i32::try_from(max_slots).unwrap_or(i32::MAX);

    (1..=max)
        .map(|pos| {
            row_slots
                .iter()
                .find(|s| s.slot_number() == pos)
                .cloned()
                .map(DisplaySlot::Stored)
                .unwrap_or_else(|| DisplaySlot::Virtual {
                    id: format!("virtual-{}-{}", row_number, pos),
                    row_number,
                    slot_number: pos,
                })
        })
        .collect()
}

/// Full grid: row 1 is always present, other stored rows follow in order.
pub fn build_grid<S: GridSlot + Clone>(slots: Vec<S>, max_slots: u32) -> Vec<(i32, Vec<DisplaySlot<S>>)> {
    let mut rows = group_by_row(slots);
    rows.entry(1).or_default();

    rows.into_iter()
        .map(|(row, row_slots)| (row, build_display_slots(&row_slots, row, max_slots)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Cell {
        name: &'static str,
        row: i32,
        pos: i32,
    }

    impl GridSlot for Cell {
        fn row_number(&self) -> i32 {
            self.row
        }
        fn slot_number(&self) -> i32 {
            self.pos
        }
    }

    fn cell(name: &'static str, row: i32, pos: i32) -> Cell {
        Cell { name, row, pos }
    }

    #[test]
    fn test_group_by_row_sorts_rows_and_positions() {
        let rows = group_by_row(vec![
            cell("c", 2, 3),
            cell("a", 1, 4),
            cell("b", 1, 2),
            cell("d", 0, 1),
        ]);
        let keys: Vec<i32> = rows.keys().copied().collect();
        assert_eq!(keys, vec![1, 2]);
        let row1: Vec<&str> = rows[&1].iter().map(|c| c.name).collect();
        assert_eq!(row1, vec!["d", "b", "a"]);
    }

    #[test]
    fn test_sparse_row_is_padded() {
        let stored = vec![cell("two", 1, 2), cell("five", 1, 5)];
        let display = build_display_slots(&stored, 1, 6);

        assert_eq!(display.len(), 6);
        assert_eq!(display[1], DisplaySlot::Stored(cell("two", 1, 2)));
        assert_eq!(display[4], DisplaySlot::Stored(cell("five", 1, 5)));
        let virtual_ids: Vec<String> = display
            .iter()
            .filter_map(|d| match d {
                DisplaySlot::Virtual { id, .. } => Some(id.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            virtual_ids,
            vec!["virtual-1-1", "virtual-1-3", "virtual-1-4", "virtual-1-6"]
        );
    }

    #[test]
    fn test_out_of_range_positions_are_dropped() {
        let stored = vec![cell("zero", 3, 0), cell("seven", 3, 7)];
        let display = build_display_slots(&stored, 3, 6);
        assert_eq!(display.len(), 6);
        assert!(display.iter().all(DisplaySlot::is_virtual));
    }

    #[test]
    fn test_grid_always_has_top_row() {
        let grid = build_grid(vec![cell("x", 3, 1)], 6);
        let rows: Vec<i32> = grid.iter().map(|(row, _)| *row).collect();
        assert_eq!(rows, vec![1, 3]);
        assert!(grid[0].1.iter().all(DisplaySlot::is_virtual));
        assert!(!grid[1].1[0].is_virtual());
    }
}
