//! Trikey Kernel: the shared vocabulary of the trikey workspace.
//!
//! # API Surface
//!
//! - [`grid`] -- grid cells, the [`grid::StateKey`] bound for maze positions,
//!   and Manhattan distance
//! - [`proof::hash`] -- SHA-256 content hashing with typed domain separation
//! - [`proof::canon`] -- the single canonical JSON writer used for every digest
//!
//! `grid` and `proof` do not depend on each other.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grid;
pub mod proof;
