//! Core domain logic for the roster manager.
//! This crate is the single source of truth for roster invariants.

pub mod db;
pub mod error;
pub mod history;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use error::{RosterError, RosterResult, ValidationError};
pub use history::versioned::VersionedRoster;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::fields::{Address, Email, GroupName, Name, Phone, RoleName, DEFAULT_ROLE_TOKEN};
pub use model::group::{Group, Role};
pub use model::membership::{Attendance, Membership};
pub use model::person::{Person, PersonPatch};
pub use model::roster::Roster;
pub use repo::record::{GroupRecord, MembershipRecord, PersonRecord, RosterRecord};
pub use repo::roster_repo::{
    RosterReader, RosterWriter, SqliteRosterStore, StoreError, StoreResult,
};
pub use service::projection::{
    FilteredPeople, MemberOf, NameContainsKeywords, PersonPredicate, ShowAll,
};
pub use service::roster_model::RosterModel;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
