//! Group and role value types.
//!
//! # Responsibility
//! - Describe one named group: its attendance capacity and role catalog.
//! - Model the implicit "no role" sentinel as [`Role::Default`].
//!
//! # Invariants
//! - The role catalog never contains the default sentinel.
//! - Catalog entries are unique and keep declaration order.

use crate::error::ValidationError;
use crate::model::fields::{is_default_token, GroupName, RoleName, DEFAULT_ROLE_TOKEN};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};

/// Role held inside one membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Implicit "no role" value, valid in every group.
    #[default]
    Default,
    /// Role taken from the group's catalog.
    Named(RoleName),
}

impl Role {
    /// Parses user/record text; the default token maps to [`Role::Default`].
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        if is_default_token(value) {
            return Ok(Self::Default);
        }
        RoleName::parse(value).map(Self::Named)
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Text form used in records: catalog name or the default token.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => DEFAULT_ROLE_TOKEN,
            Self::Named(name) => name.as_str(),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named group with an attendance capacity and an assignable role catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: GroupName,
    capacity: u32,
    roles: Vec<RoleName>,
}

impl Group {
    /// Creates a group from already validated parts.
    ///
    /// # Errors
    /// - `DuplicateRole` when the catalog repeats a role.
    pub fn new(
        name: GroupName,
        capacity: u32,
        roles: impl IntoIterator<Item = RoleName>,
    ) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        let mut catalog = Vec::new();
        for role in roles {
            if !seen.insert(role.clone()) {
                return Err(ValidationError::DuplicateRole(role.as_str().to_string()));
            }
            catalog.push(role);
        }

        Ok(Self {
            name,
            capacity,
            roles: catalog,
        })
    }

    /// Creates a group from raw text fields.
    pub fn parse<S: AsRef<str>>(
        name: impl AsRef<str>,
        capacity: u32,
        roles: impl IntoIterator<Item = S>,
    ) -> Result<Self, ValidationError> {
        let name = GroupName::parse(name)?;
        let roles = roles
            .into_iter()
            .map(RoleName::parse)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, capacity, roles)
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    /// Maximum attendance count any member can reach.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Assignable roles, excluding the implicit default.
    pub fn roles(&self) -> &[RoleName] {
        &self.roles
    }

    /// Returns whether `role` may be held in this group.
    ///
    /// The default role is valid everywhere.
    pub fn has_role(&self, role: &Role) -> bool {
        match role {
            Role::Default => true,
            Role::Named(name) => self.roles.contains(name),
        }
    }

    /// Weak identity: groups are the same when their names match.
    pub fn is_same_group(&self, other: &Group) -> bool {
        self.name == other.name
    }
}
