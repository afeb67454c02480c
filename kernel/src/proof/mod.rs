//! Proof module: canonical hashing and canonical JSON.
//!
//! Depends on nothing else in the kernel.

pub mod canon;
pub mod hash;
pub mod hash_domain;
