//! `GridMaze`: a rectangular text maze implementing [`MazeModel`].
//!
//! # Tiles
//!
//! | Char | Tile  | Arrival cost |
//! |------|-------|--------------|
//! | `X`  | wall  | impassable   |
//! | `.`  | floor | 1            |
//! | `I`  | start (floor) | 1    |
//! | `K`  | key (floor)   | 1    |
//! | `M`  | mud   | 3            |
//!
//! Moves are `U D L R` onto any non-wall cell inside the grid, enumerated in
//! that order.

use trikey_kernel::grid::{Cell, Direction};
use trikey_kernel::proof::canon::{canonical_json_bytes, CanonError};
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use trikey_search::contract::MazeModel;

/// Arrival cost of a floor cell.
pub const FLOOR_COST: u64 = 1;

/// Arrival cost of a mud cell.
pub const MUD_COST: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Wall,
    Floor,
    Mud,
}

/// Error parsing maze text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeParseError {
    /// No rows at all.
    Empty,
    /// A row's width differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    /// A character outside the tile alphabet.
    UnknownTile { row: usize, col: usize, ch: char },
    /// No `I` cell.
    MissingStart,
    /// More than one `I` cell.
    DuplicateStart { first: Cell, second: Cell },
    /// Grid dimensions do not fit a `Cell`.
    TooLarge,
}

impl std::fmt::Display for MazeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("maze has no rows"),
            Self::RaggedRow {
                row,
                expected,
                actual,
            } => write!(f, "row {row} has width {actual}, expected {expected}"),
            Self::UnknownTile { row, col, ch } => {
                write!(f, "unknown tile {ch:?} at row {row}, col {col}")
            }
            Self::MissingStart => f.write_str("maze has no start cell 'I'"),
            Self::DuplicateStart { first, second } => {
                write!(f, "maze has two start cells: {first} and {second}")
            }
            Self::TooLarge => f.write_str("maze dimensions exceed u32"),
        }
    }
}

impl std::error::Error for MazeParseError {}

/// A parsed grid maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMaze {
    world_id: String,
    rows: Vec<String>,
    tiles: Vec<Vec<Tile>>,
    start: Cell,
    keys: Vec<Cell>,
}

impl GridMaze {
    /// Parse a maze from newline-separated rows.
    ///
    /// Leading and trailing blank lines are ignored; every other row must have
    /// the same width.
    ///
    /// # Errors
    ///
    /// Returns [`MazeParseError`] for empty, ragged, or unknown input and for
    /// a missing or repeated start cell. The key count is not checked here.
    pub fn parse(world_id: &str, text: &str) -> Result<Self, MazeParseError> {
        let rows: Vec<&str> = text.trim_matches('\n').lines().collect();
        Self::from_rows(world_id, &rows)
    }

    /// Parse a maze from pre-split rows.
    ///
    /// # Errors
    ///
    /// See [`GridMaze::parse`].
    pub fn from_rows(world_id: &str, rows: &[&str]) -> Result<Self, MazeParseError> {
        let width = rows.first().ok_or(MazeParseError::Empty)?.chars().count();
        if width == 0 {
            return Err(MazeParseError::Empty);
        }
        if u32::try_from(rows.len()).is_err() || u32::try_from(width).is_err() {
            return Err(MazeParseError::TooLarge);
        }

        let mut tiles = Vec::with_capacity(rows.len());
        let mut start: Option<Cell> = None;
        let mut keys = Vec::new();

        for (r, line) in rows.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(MazeParseError::RaggedRow {
                    row: r,
                    expected: width,
                    actual,
                });
            }
            let mut row_tiles = Vec::with_capacity(width);
            for (c, ch) in line.chars().enumerate() {
                let cell = cell_at(r, c)?;
                let tile = match ch {
                    'X' => Tile::Wall,
                    '.' => Tile::Floor,
                    'M' => Tile::Mud,
                    'I' => {
                        if let Some(first) = start {
                            return Err(MazeParseError::DuplicateStart {
                                first,
                                second: cell,
                            });
                        }
                        start = Some(cell);
                        Tile::Floor
                    }
                    'K' => {
                        keys.push(cell);
                        Tile::Floor
                    }
                    other => {
                        return Err(MazeParseError::UnknownTile {
                            row: r,
                            col: c,
                            ch: other,
                        })
                    }
                };
                row_tiles.push(tile);
            }
            tiles.push(row_tiles);
        }

        Ok(Self {
            world_id: world_id.to_string(),
            rows: rows.iter().map(|s| (*s).to_string()).collect(),
            tiles,
            start: start.ok_or(MazeParseError::MissingStart)?,
            keys,
        })
    }

    #[must_use]
    pub fn start(&self) -> Cell {
        self.start
    }

    /// Key cells in row-major order.
    #[must_use]
    pub fn keys(&self) -> &[Cell] {
        &self.keys
    }

    /// The source rows, as parsed.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// `true` if `cell` is inside the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.tile(cell).is_some_and(|t| t != Tile::Wall)
    }

    fn tile(&self, cell: Cell) -> Option<Tile> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        self.tiles.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Canonical JSON description of the problem.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "rows": self.rows,
            "world_id": self.world_id,
        })
    }

    /// Content hash of the problem description.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonical serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::MazeProblem, &bytes))
    }
}

fn cell_at(row: usize, col: usize) -> Result<Cell, MazeParseError> {
    let row = u32::try_from(row).map_err(|_| MazeParseError::TooLarge)?;
    let col = u32::try_from(col).map_err(|_| MazeParseError::TooLarge)?;
    Ok(Cell::new(row, col))
}

impl MazeModel for GridMaze {
    type Position = Cell;
    type Action = Direction;

    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn initial_position(&self) -> Cell {
        self.start
    }

    fn key_positions(&self) -> Vec<Cell> {
        self.keys.clone()
    }

    fn transitions(&self, position: &Cell) -> Vec<(Direction, Cell)> {
        Direction::ALL
            .iter()
            .filter_map(|&d| position.step(d).map(|next| (d, next)))
            .filter(|&(_, next)| self.is_open(next))
            .collect()
    }

    fn cost(&self, position: &Cell) -> u64 {
        match self.tile(*position) {
            Some(Tile::Mud) => MUD_COST,
            _ => FLOOR_COST,
        }
    }

    fn distance(&self, from: &Cell, to: &Cell) -> u64 {
        from.manhattan(*to)
    }
}
