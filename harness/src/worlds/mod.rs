//! Built-in maze worlds.
//!
//! Each world is a fixed text layout plus its known optimal path cost
//! (`None` when no collecting path exists). The costs are hand-derived and
//! checked by the lock tests against a zero-heuristic search.

use crate::maze::{GridMaze, MazeParseError};

/// A named maze layout with its expected optimal cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldFixture {
    pub world_id: &'static str,
    pub rows: &'static [&'static str],
    pub optimal_cost: Option<u64>,
}

impl WorldFixture {
    /// Parse the layout into a [`GridMaze`].
    ///
    /// # Errors
    ///
    /// Returns [`MazeParseError`] if the layout is malformed.
    pub fn maze(&self) -> Result<GridMaze, MazeParseError> {
        GridMaze::from_rows(self.world_id, self.rows)
    }
}

/// Three keys in a line to the right of the start.
pub const CORRIDOR: WorldFixture = WorldFixture {
    world_id: "corridor",
    rows: &["IKKK"],
    optimal_cost: Some(3),
};

/// Open 5x5 room; several visiting orders tie on cost.
pub const OPEN_ROOM: WorldFixture = WorldFixture {
    world_id: "open_room",
    rows: &["I....", ".....", "..K..", ".....", "K...K"],
    optimal_cost: Some(12),
};

/// The short route to the top-right key crosses mud; walking around is cheaper.
pub const MUD_DETOUR: WorldFixture = WorldFixture {
    world_id: "mud_detour",
    rows: &["IMMK", ".XX.", "....", "K..K"],
    optimal_cost: Some(9),
};

/// Two keys sit behind a solid wall.
pub const UNREACHABLE_KEY: WorldFixture = WorldFixture {
    world_id: "unreachable_key",
    rows: &["I.K", "XXX", "K.K"],
    optimal_cost: None,
};

/// Walls force detours between every pair of keys.
pub const WALLED_KEYS: WorldFixture = WorldFixture {
    world_id: "walled_keys",
    rows: &["I.X.K", "..X..", ".XX.X", ".....", "K.X.K"],
    optimal_cost: Some(16),
};

/// Every built-in world, in a stable order.
pub const ALL: &[WorldFixture] = &[CORRIDOR, OPEN_ROOM, MUD_DETOUR, UNREACHABLE_KEY, WALLED_KEYS];

/// Look up a built-in world by id.
#[must_use]
pub fn by_id(world_id: &str) -> Option<WorldFixture> {
    ALL.iter().copied().find(|w| w.world_id == world_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trikey_search::validate_problem;

    #[test]
    fn every_world_parses_with_three_keys() {
        for world in ALL {
            let maze = world.maze().unwrap();
            assert_eq!(maze.keys().len(), 3, "{}", world.world_id);
            validate_problem(&maze).unwrap();
        }
    }

    #[test]
    fn ids_are_unique_and_resolvable() {
        for world in ALL {
            assert_eq!(by_id(world.world_id), Some(*world));
        }
        assert_eq!(by_id("nope"), None);
    }
}
