//! Committed roster history with undo/redo.
//!
//! # Responsibility
//! - Keep full immutable roster snapshots and a cursor into them.
//!
//! # Invariants
//! - The cursor always indexes a stored snapshot.
//! - Committing below the tail forfeits the redo tail; history never branches.

pub mod versioned;
