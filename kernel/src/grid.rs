//! Grid cells and the position bound used by maze models.
//!
//! The search core never inspects a position beyond equality, ordering,
//! hashing, and its identity bytes. [`Cell`] is the concrete row/column
//! position used by the harness grid worlds.
//!
//! # Identity bytes
//!
//! | Byte | Width  | Field |
//! |------|--------|-------|
//! | 0-3  | u32le  | row   |
//! | 4-7  | u32le  | col   |

use std::fmt;

/// Bound for positions the search core can key its state on.
///
/// `identity_bytes` must be injective: two positions produce the same bytes
/// iff they are equal. The bytes feed the search-state fingerprint.
pub trait StateKey: Clone + Eq + Ord + std::hash::Hash + fmt::Debug {
    /// Stable byte encoding of this position.
    fn identity_bytes(&self) -> Vec<u8>;
}

/// A maze cell addressed by row and column.
///
/// Derives `Ord` (row-major) so key tables and visited sets iterate in a
/// canonical order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Manhattan (L1) distance between two cells.
    #[must_use]
    pub fn manhattan(self, other: Self) -> u64 {
        u64::from(self.row.abs_diff(other.row)) + u64::from(self.col.abs_diff(other.col))
    }

    /// The neighbouring cell one step in `direction`, or `None` when the step
    /// would leave the non-negative quadrant.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Self { row, ..self }),
            Direction::Down => self.row.checked_add(1).map(|row| Self { row, ..self }),
            Direction::Left => self.col.checked_sub(1).map(|col| Self { col, ..self }),
            Direction::Right => self.col.checked_add(1).map(|col| Self { col, ..self }),
        }
    }

    /// Fixed-width little-endian encoding (see module docs).
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; 8] {
        let mut out = [0u8; 8];
        out[..4].copy_from_slice(&self.row.to_le_bytes());
        out[4..].copy_from_slice(&self.col.to_le_bytes());
        out
    }
}

impl StateKey for Cell {
    fn identity_bytes(&self) -> Vec<u8> {
        self.to_le_bytes().to_vec()
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four grid moves.
///
/// Declaration order is the canonical enumeration order for grid transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in canonical order.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Single-letter action label (`"U"`, `"D"`, `"L"`, `"R"`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "U",
            Self::Down => "D",
            Self::Left => "L",
            Self::Right => "R",
        }
    }

    /// Parse a single-letter action label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "U" => Some(Self::Up),
            "D" => Some(Self::Down),
            "L" => Some(Self::Left),
            "R" => Some(Self::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
