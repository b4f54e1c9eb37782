//! Error kinds shared by roster value types, the aggregate and history.
//!
//! # Responsibility
//! - Name every business-rule rejection the core can report.
//! - Keep field-level validation reasons separate from aggregate conflicts.
//!
//! # Invariants
//! - Every error is recoverable; no core operation panics on bad input.
//! - An operation that returns an error has not changed any state.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used across roster core operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Field-level reason attached to [`RosterError::ValidationFailed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is blank after trim.
    Blank(&'static str),
    /// Field text does not match its allowed shape.
    InvalidFormat { field: &'static str, value: String },
    /// Role catalog entry spells the reserved default token.
    ReservedRoleName(String),
    /// Role catalog lists the same role twice.
    DuplicateRole(String),
    /// Person already holds a membership for this group.
    DuplicateMembership(String),
    /// Edit descriptor carries no changes.
    NothingToEdit,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank(field) => write!(f, "{field} must not be blank"),
            Self::InvalidFormat { field, value } => {
                write!(f, "invalid {field}: `{value}`")
            }
            Self::ReservedRoleName(value) => write!(f, "role name is reserved: `{value}`"),
            Self::DuplicateRole(value) => write!(f, "role listed more than once: `{value}`"),
            Self::DuplicateMembership(group) => {
                write!(f, "person already belongs to group `{group}`")
            }
            Self::NothingToEdit => write!(f, "at least one field must be edited"),
        }
    }
}

impl Error for ValidationError {}

/// Business-rule error for roster operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    DuplicatePerson(String),
    PersonNotFound(String),
    DuplicateGroup(String),
    GroupNotFound(String),
    RoleNotFound {
        group: String,
        role: String,
    },
    RoleAlreadyAssigned {
        group: String,
        role: String,
    },
    DefaultRoleNotAllowed,
    NoRoleAssigned {
        group: String,
    },
    /// Attendance would pass the owning group's capacity.
    ///
    /// `current` is the count already held (or the stored count being
    /// rebuilt) and `requested` the sessions being added, `0` when rebuilding.
    AttendanceCapExceeded {
        current: u32,
        requested: u32,
        capacity: u32,
    },
    NoPreviousState,
    NoNextState,
    ValidationFailed(ValidationError),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePerson(name) => write!(f, "person already exists: {name}"),
            Self::PersonNotFound(name) => write!(f, "person not found: {name}"),
            Self::DuplicateGroup(name) => write!(f, "group already exists: {name}"),
            Self::GroupNotFound(name) => write!(f, "group not found: {name}"),
            Self::RoleNotFound { group, role } => {
                write!(f, "role `{role}` is not defined in group `{group}`")
            }
            Self::RoleAlreadyAssigned { group, role } => {
                write!(f, "role `{role}` is already assigned in group `{group}`")
            }
            Self::DefaultRoleNotAllowed => write!(f, "the default role cannot be assigned"),
            Self::NoRoleAssigned { group } => write!(f, "no role assigned in group `{group}`"),
            Self::AttendanceCapExceeded {
                current,
                requested,
                capacity,
            } => write!(
                f,
                "attendance {current} + {requested} exceeds capacity {capacity}"
            ),
            Self::NoPreviousState => write!(f, "no previous roster state to restore"),
            Self::NoNextState => write!(f, "no next roster state to restore"),
            Self::ValidationFailed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ValidationFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RosterError {
    fn from(value: ValidationError) -> Self {
        Self::ValidationFailed(value)
    }
}
