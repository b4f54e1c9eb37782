//! Model-level services consumed by command and presentation layers.
//!
//! # Responsibility
//! - Own the versioned roster and its filtered projection.
//! - Keep UI-facing callers decoupled from history and storage details.

pub mod projection;
pub mod roster_model;
