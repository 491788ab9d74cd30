//! The fixed tone palette.
//!
//! Nine tones laid out as a 3x3 grid, formal tones on the top row and
//! expressive ones on the bottom. The catalog is static; tones are never
//! created at runtime.

use std::fmt;

/// Row/column of a tone in the 3x3 picker grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: u8,
    pub column: u8,
}

impl GridPosition {
    const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = match self.row {
            0 => "top",
            1 => "middle",
            _ => "bottom",
        };
        let column = match self.column {
            0 => "left",
            1 => "center",
            _ => "right",
        };
        write!(f, "{row}-{column}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneOption {
    pub id: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub position: GridPosition,
}

pub const GRID_SIZE: usize = 3;

impl ToneOption {
    /// 1-based grid index, the inverse of [`tone_at`].
    pub const fn grid_index(&self) -> usize {
        self.position.row as usize * GRID_SIZE + self.position.column as usize + 1
    }
}

/// All tones in row-major grid order.
pub const TONE_CATALOG: [ToneOption; 9] = [
    ToneOption {
        id: "professional",
        label: "Professional",
        description: Some("Formal business communication"),
        position: GridPosition::new(0, 0),
    },
    ToneOption {
        id: "serious",
        label: "Serious",
        description: Some("Grave and important tone"),
        position: GridPosition::new(0, 1),
    },
    ToneOption {
        id: "formal",
        label: "Formal",
        description: Some("Official and structured"),
        position: GridPosition::new(0, 2),
    },
    ToneOption {
        id: "friendly",
        label: "Friendly",
        description: Some("Warm and approachable"),
        position: GridPosition::new(1, 0),
    },
    ToneOption {
        id: "casual",
        label: "Casual",
        description: Some("Relaxed and informal"),
        position: GridPosition::new(1, 1),
    },
    ToneOption {
        id: "playful",
        label: "Playful",
        description: Some("Fun and lighthearted"),
        position: GridPosition::new(1, 2),
    },
    ToneOption {
        id: "creative",
        label: "Creative",
        description: Some("Artistic and imaginative"),
        position: GridPosition::new(2, 0),
    },
    ToneOption {
        id: "enthusiastic",
        label: "Enthusiastic",
        description: Some("Energetic and excited"),
        position: GridPosition::new(2, 1),
    },
    ToneOption {
        id: "confident",
        label: "Confident",
        description: Some("Assertive and sure"),
        position: GridPosition::new(2, 2),
    },
];

/// Look up a tone by identifier (exact match).
pub fn find_tone(id: &str) -> Option<&'static ToneOption> {
    TONE_CATALOG.iter().find(|tone| tone.id == id)
}

pub fn is_catalog_tone(id: &str) -> bool {
    find_tone(id).is_some()
}

/// Tone at 1-based grid index (1 = top-left, 9 = bottom-right).
pub fn tone_at(index: usize) -> Option<&'static ToneOption> {
    index.checked_sub(1).and_then(|i| TONE_CATALOG.get(i))
}

/// The catalog split into grid rows.
pub fn grid_rows() -> impl Iterator<Item = &'static [ToneOption]> {
    TONE_CATALOG.chunks(GRID_SIZE)
}
