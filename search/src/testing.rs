//! In-crate grid fixture for unit tests.
//!
//! `X` wall, `.` floor, `I` start, `K` key, `M` mud (arrival cost 3).

use std::collections::BTreeSet;

use trikey_kernel::grid::{Cell, Direction};

use crate::contract::MazeModel;

pub(crate) struct GridFixture {
    rows: Vec<Vec<u8>>,
    start: Cell,
    keys: Vec<Cell>,
    /// Panic inside `transitions` when asked about this cell.
    pub(crate) poison: Option<Cell>,
}

impl GridFixture {
    pub(crate) fn parse(rows: &[&str]) -> Self {
        let mut start = Cell::new(0, 0);
        let mut keys = BTreeSet::new();
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.bytes().enumerate() {
                let cell = Cell::new(u32::try_from(r).unwrap(), u32::try_from(c).unwrap());
                match ch {
                    b'I' => start = cell,
                    b'K' => {
                        keys.insert(cell);
                    }
                    _ => {}
                }
            }
        }
        Self {
            rows: rows.iter().map(|l| l.as_bytes().to_vec()).collect(),
            start,
            keys: keys.into_iter().collect(),
            poison: None,
        }
    }

    /// Replace the parsed key cells.
    pub(crate) fn with_keys(mut self, keys: Vec<Cell>) -> Self {
        self.keys = keys;
        self
    }

    pub(crate) fn key_positions_vec(&self) -> Vec<Cell> {
        self.keys.clone()
    }

    fn tile(&self, cell: Cell) -> Option<u8> {
        self.rows
            .get(cell.row as usize)
            .and_then(|r| r.get(cell.col as usize))
            .copied()
    }
}

impl MazeModel for GridFixture {
    type Position = Cell;
    type Action = Direction;

    fn world_id(&self) -> &str {
        "grid_fixture"
    }

    fn initial_position(&self) -> Cell {
        self.start
    }

    fn key_positions(&self) -> Vec<Cell> {
        self.keys.clone()
    }

    fn transitions(&self, position: &Cell) -> Vec<(Direction, Cell)> {
        assert!(self.poison != Some(*position), "poisoned cell {position:?}");
        Direction::ALL
            .iter()
            .filter_map(|&d| position.step(d).map(|next| (d, next)))
            .filter(|(_, next)| matches!(self.tile(*next), Some(t) if t != b'X'))
            .collect()
    }

    fn cost(&self, position: &Cell) -> u64 {
        if self.tile(*position) == Some(b'M') {
            3
        } else {
            1
        }
    }

    fn distance(&self, from: &Cell, to: &Cell) -> u64 {
        from.manhattan(*to)
    }
}
