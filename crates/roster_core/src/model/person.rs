//! Person value type and edit descriptor.
//!
//! # Responsibility
//! - Hold contact fields and the set of group memberships for one person.
//! - Route membership operations to the named membership.
//!
//! # Invariants
//! - At most one membership per group name.
//! - Weak identity (`is_same_person`) compares names only; `==` compares all fields.
//! - Every transformation returns a new `Person`.

use crate::error::{RosterError, RosterResult, ValidationError};
use crate::model::fields::{normalize_lookup, Address, Email, Name, Phone};
use crate::model::group::{Group, Role};
use crate::model::membership::Membership;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// One person in the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    name: Name,
    phone: Phone,
    email: Email,
    address: Address,
    memberships: BTreeMap<String, Membership>,
}

impl Person {
    /// Creates a person from validated fields.
    ///
    /// # Errors
    /// - `DuplicateMembership` when two memberships target the same group.
    pub fn new(
        name: Name,
        phone: Phone,
        email: Email,
        address: Address,
        memberships: impl IntoIterator<Item = Membership>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name,
            phone,
            email,
            address,
            memberships: collect_memberships(memberships)?,
        })
    }

    /// Creates a person with no memberships from raw text fields.
    pub fn parse(
        name: impl AsRef<str>,
        phone: impl AsRef<str>,
        email: impl AsRef<str>,
        address: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            Name::parse(name)?,
            Phone::parse(phone)?,
            Email::parse(email)?,
            Address::parse(address)?,
            Vec::new(),
        )
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Memberships ordered by group name.
    pub fn memberships(&self) -> impl Iterator<Item = &Membership> + '_ {
        self.memberships.values()
    }

    pub fn membership_count(&self) -> usize {
        self.memberships.len()
    }

    /// Groups this person belongs to, ordered by group name.
    pub fn groups(&self) -> impl Iterator<Item = &Group> + '_ {
        self.memberships.values().map(Membership::group)
    }

    pub fn membership(&self, group_name: &str) -> Option<&Membership> {
        self.memberships.get(normalize_lookup(group_name).as_ref())
    }

    pub fn has_membership(&self, group_name: &str) -> bool {
        self.membership(group_name).is_some()
    }

    /// Weak identity used for duplicate detection.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    /// Adds a default membership in `group`.
    pub fn join(&self, group: Group) -> RosterResult<Self> {
        let key = group.name().as_str().to_string();
        if self.memberships.contains_key(&key) {
            return Err(ValidationError::DuplicateMembership(key).into());
        }
        let mut next = self.clone();
        next.memberships.insert(key, Membership::join(group));
        Ok(next)
    }

    /// Drops the membership for `group_name`. No-op when absent.
    pub fn leave(&self, group_name: &str) -> Self {
        if !self.has_membership(group_name) {
            return self.clone();
        }
        let mut next = self.clone();
        next.memberships.remove(normalize_lookup(group_name).as_ref());
        next
    }

    /// Adds `amount` attended sessions in `group_name`.
    pub fn attend(&self, group_name: &str, amount: u32) -> RosterResult<Self> {
        self.update_membership(group_name, |membership| membership.with_attendance(amount))
    }

    /// Assigns `role` in `group_name`.
    pub fn assign_role(&self, group_name: &str, role: Role) -> RosterResult<Self> {
        self.update_membership(group_name, |membership| membership.with_role(role))
    }

    /// Clears the role held in `group_name`.
    pub fn unassign_role(&self, group_name: &str) -> RosterResult<Self> {
        self.update_membership(group_name, Membership::without_role)
    }

    /// Applies an edit descriptor, returning the edited person.
    ///
    /// # Errors
    /// - `NothingToEdit` when `patch` carries no field.
    /// - `DuplicateMembership` when the replacement memberships repeat a group.
    pub fn apply(&self, patch: &PersonPatch) -> RosterResult<Self> {
        if patch.is_empty() {
            return Err(ValidationError::NothingToEdit.into());
        }

        let memberships = match &patch.memberships {
            Some(replacement) => collect_memberships(replacement.iter().cloned())?,
            None => self.memberships.clone(),
        };

        Ok(Self {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            phone: patch.phone.clone().unwrap_or_else(|| self.phone.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            address: patch.address.clone().unwrap_or_else(|| self.address.clone()),
            memberships,
        })
    }

    /// Re-points the membership keyed `old_group_name` at `group`.
    ///
    /// The membership is re-keyed when the group was renamed.
    pub(crate) fn rebind_group(&self, old_group_name: &str, group: &Group) -> RosterResult<Self> {
        let Some(current) = self.memberships.get(old_group_name) else {
            return Ok(self.clone());
        };
        let rebound = current.rebind(group.clone())?;
        let mut next = self.clone();
        next.memberships.remove(old_group_name);
        next.memberships
            .insert(group.name().as_str().to_string(), rebound);
        Ok(next)
    }

    fn update_membership(
        &self,
        group_name: &str,
        op: impl FnOnce(&Membership) -> RosterResult<Membership>,
    ) -> RosterResult<Self> {
        let key = normalize_lookup(group_name).into_owned();
        let current = self
            .memberships
            .get(&key)
            .ok_or_else(|| RosterError::GroupNotFound(key.clone()))?;
        let updated = op(current)?;
        let mut next = self.clone();
        next.memberships.insert(key, updated);
        Ok(next)
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}",
            self.name, self.phone, self.email, self.address
        )?;
        for membership in self.memberships.values() {
            write!(f, "; {membership}")?;
        }
        Ok(())
    }
}

/// Edit descriptor: each `Some` field replaces the person's current value.
///
/// `memberships`, when set, replaces the whole membership set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
    pub name: Option<Name>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub memberships: Option<Vec<Membership>>,
}

impl PersonPatch {
    /// Returns whether no field is edited.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.address.is_none()
            && self.memberships.is_none()
    }
}

fn collect_memberships(
    memberships: impl IntoIterator<Item = Membership>,
) -> Result<BTreeMap<String, Membership>, ValidationError> {
    let mut by_group = BTreeMap::new();
    for membership in memberships {
        let key = membership.group_name().as_str().to_string();
        if by_group.contains_key(&key) {
            return Err(ValidationError::DuplicateMembership(key));
        }
        by_group.insert(key, membership);
    }
    Ok(by_group)
}
