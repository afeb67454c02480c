//! Trikey Harness: grid worlds and run orchestration for the search crate.
//!
//! The harness parses text mazes into [`MazeModel`] implementations, runs
//! them through `trikey_search`, replays every answer independently, and
//! persists digest-stamped reports.
//!
//! The harness does NOT implement search logic; it delegates to the search
//! crate. Worlds provide layout data only.
//!
//! [`MazeModel`]: trikey_search::contract::MazeModel

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod maze;
pub mod replay;
pub mod report_dir;
pub mod runner;
pub mod worlds;
