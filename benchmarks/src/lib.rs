//! Shared helpers for trikey benchmark suites.
//!
//! Regimes are generated mazes sized to stress one part of the search:
//! open rooms grow the frontier, combs force long detours, mud fields make
//! the uniform-cost and informed orders diverge.

use trikey_harness::maze::GridMaze;
use trikey_kernel::grid::{Cell, Direction};
use trikey_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use trikey_search::policy::SearchPolicyV1;
use trikey_search::SearchResult;

/// A named maze plus the policy to search it with.
pub struct Regime {
    pub name: String,
    pub maze: GridMaze,
    pub policy: SearchPolicyV1,
}

/// Square open room with the start in one corner and a key in each other
/// corner. `side` is clamped to at least 2.
///
/// # Panics
///
/// Panics if the generated layout fails to parse. Benchmark setup failures
/// are fatal.
#[must_use]
pub fn open_room(side: usize) -> GridMaze {
    let side = side.max(2);
    let rows: Vec<String> = (0..side)
        .map(|r| {
            (0..side)
                .map(|c| corner_tile(r, c, side).unwrap_or('.'))
                .collect()
        })
        .collect();
    parse(&format!("open_room_{side}"), &rows)
}

/// Open room where every third column is mud.
///
/// # Panics
///
/// Panics if the generated layout fails to parse.
#[must_use]
pub fn mud_field(side: usize) -> GridMaze {
    let side = side.max(2);
    let rows: Vec<String> = (0..side)
        .map(|r| {
            (0..side)
                .map(|c| corner_tile(r, c, side).unwrap_or(if c % 3 == 1 { 'M' } else { '.' }))
                .collect()
        })
        .collect();
    parse(&format!("mud_field_{side}"), &rows)
}

/// Comb of wall columns with alternating gaps, so every route snakes.
/// `side` is rounded up to the next odd number (minimum 3) to keep the key
/// corners off wall columns.
///
/// # Panics
///
/// Panics if the generated layout fails to parse.
#[must_use]
pub fn comb(side: usize) -> GridMaze {
    let side = side.max(3) | 1;
    let rows: Vec<String> = (0..side)
        .map(|r| {
            (0..side)
                .map(|c| {
                    corner_tile(r, c, side).unwrap_or_else(|| {
                        let gap_row = if c % 4 == 1 { side - 1 } else { 0 };
                        if c % 2 == 1 && r != gap_row {
                            'X'
                        } else {
                            '.'
                        }
                    })
                })
                .collect()
        })
        .collect();
    parse(&format!("comb_{side}"), &rows)
}

fn corner_tile(r: usize, c: usize, side: usize) -> Option<char> {
    let last = side - 1;
    match (r, c) {
        (0, 0) => Some('I'),
        (0, c) | (c, 0) if c == last => Some('K'),
        (r, c) if r == last && c == last => Some('K'),
        _ => None,
    }
}

fn parse(name: &str, rows: &[String]) -> GridMaze {
    let borrowed: Vec<&str> = rows.iter().map(String::as_str).collect();
    GridMaze::from_rows(name, &borrowed).expect("generated maze parses")
}

/// The standard regime set used by the macro and auditable suites.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    let policy = SearchPolicyV1::default();
    vec![
        Regime {
            name: "open_room_16".into(),
            maze: open_room(16),
            policy: policy.clone(),
        },
        Regime {
            name: "open_room_32".into(),
            maze: open_room(32),
            policy: policy.clone(),
        },
        Regime {
            name: "mud_field_24".into(),
            maze: mud_field(24),
            policy: policy.clone(),
        },
        Regime {
            name: "comb_25".into(),
            maze: comb(25),
            policy: policy.clone(),
        },
        Regime {
            name: "budget_limited".into(),
            maze: open_room(32),
            policy: SearchPolicyV1 {
                max_expansions: Some(200),
                ..policy
            },
        },
    ]
}

/// Run `search()` on a regime.
///
/// # Panics
///
/// Panics if `search()` returns a pre-flight error. Benchmark runs are
/// expected to pass pre-flight.
#[must_use]
pub fn run_search_only(regime: &Regime) -> SearchResult<Cell, Direction> {
    trikey_search::search(&regime.maze, &regime.policy).expect("search should pass pre-flight")
}

/// Digest binding a run's graph, so timed iterations can be checked for
/// identical output.
///
/// # Panics
///
/// Panics if graph serialization fails.
#[must_use]
pub fn determinism_guard(result: &SearchResult<Cell, Direction>) -> ContentHash {
    let bytes = result
        .graph
        .to_canonical_json_bytes()
        .expect("graph serializes");
    canonical_hash(HashDomain::BenchGuard, &bytes)
}
