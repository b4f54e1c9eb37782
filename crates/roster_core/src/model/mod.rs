//! Roster domain model.
//!
//! # Responsibility
//! - Define the validated value types for people, groups and memberships.
//! - Define the roster aggregate that keeps references between them intact.
//!
//! # Invariants
//! - Values are immutable after construction; updates return new values.
//! - A person is identified by name, a group by group name.

pub mod fields;
pub mod group;
pub mod membership;
pub mod person;
pub mod roster;
