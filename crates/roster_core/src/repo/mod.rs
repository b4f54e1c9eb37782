//! Persistence boundary for whole-roster load and save.
//!
//! # Responsibility
//! - Define the serializable record shape of a roster.
//! - Provide read/write storage capabilities and a SQLite implementation.
//!
//! # Invariants
//! - Loading re-validates every roster invariant before returning a roster.
//! - Repository APIs return semantic roster errors alongside DB transport errors.

pub mod record;
pub mod roster_repo;
