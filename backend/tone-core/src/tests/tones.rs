// Unit tests for the tone catalog

use crate::DEFAULT_TONE;
use crate::tones::{GRID_SIZE, TONE_CATALOG, find_tone, grid_rows, is_catalog_tone, tone_at};

use std::collections::HashSet;

/// **VALUE**: Verifies the catalog has nine unique identifiers in a full 3x3 grid.
///
/// **WHY THIS MATTERS**: The picker renders by grid position and selects by id.
/// A duplicated id or position would make one tone unreachable.
#[test]
fn given_catalog_when_inspected_then_nine_unique_ids_and_positions() {
    // GIVEN/WHEN: The static catalog
    let ids: HashSet<_> = TONE_CATALOG.iter().map(|t| t.id).collect();
    let positions: HashSet<_> = TONE_CATALOG
        .iter()
        .map(|t| (t.position.row, t.position.column))
        .collect();

    // THEN: Nine distinct ids and nine distinct cells
    assert_eq!(TONE_CATALOG.len(), 9);
    assert_eq!(ids.len(), 9, "Tone ids must be unique");
    assert_eq!(positions.len(), 9, "Grid positions must be unique");
    assert!(TONE_CATALOG.iter().all(|t| t.description.is_some()));
}

/// **VALUE**: Verifies row-major order matches the grid position tags.
///
/// **BUG THIS CATCHES**: Would catch reordering the array without updating positions,
/// which would make numeric selection (1-9) pick the wrong tone.
#[test]
fn given_catalog_when_split_into_rows_then_positions_match_order() {
    for (row_index, row) in grid_rows().enumerate() {
        assert_eq!(row.len(), GRID_SIZE);
        for (column_index, tone) in row.iter().enumerate() {
            assert_eq!(usize::from(tone.position.row), row_index, "{}", tone.id);
            assert_eq!(usize::from(tone.position.column), column_index, "{}", tone.id);
        }
    }

    assert_eq!(TONE_CATALOG[0].position.to_string(), "top-left");
    assert_eq!(TONE_CATALOG[4].position.to_string(), "middle-center");
    assert_eq!(TONE_CATALOG[8].position.to_string(), "bottom-right");
}

#[test]
fn given_ids_when_looked_up_then_only_exact_catalog_ids_match() {
    assert_eq!(find_tone("formal").map(|t| t.label), Some("Formal"));
    assert!(is_catalog_tone(DEFAULT_TONE), "Default tone must be in the catalog");
    assert!(!is_catalog_tone("Formal"), "Lookup is case-sensitive");
    assert!(!is_catalog_tone("sarcastic"));
    assert!(!is_catalog_tone(""));
}

#[test]
fn given_grid_index_when_resolved_then_one_based() {
    assert_eq!(tone_at(1).map(|t| t.id), Some("professional"));
    assert_eq!(tone_at(5).map(|t| t.id), Some("casual"));
    assert_eq!(tone_at(9).map(|t| t.id), Some("confident"));
    assert!(tone_at(0).is_none());
    assert!(tone_at(10).is_none());
}

#[test]
fn given_each_tone_when_grid_index_taken_then_tone_at_returns_it() {
    for tone in &TONE_CATALOG {
        assert_eq!(tone_at(tone.grid_index()), Some(tone));
    }
}
