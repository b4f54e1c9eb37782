//! Whole-roster record shape exchanged with persistence collaborators.
//!
//! # Responsibility
//! - Mirror the roster as plain serializable data.
//! - Re-validate every in-memory invariant when turning records back into a roster.
//!
//! # Invariants
//! - `into_roster` either returns a fully valid roster or fails the whole load.
//! - Export order matches roster insertion order; memberships are ordered by group.

use crate::error::{RosterError, RosterResult};
use crate::model::fields::{Address, Email, GroupName, Name, Phone};
use crate::model::group::{Group, Role};
use crate::model::membership::Membership;
use crate::model::person::Person;
use crate::model::roster::Roster;
use serde::{Deserialize, Serialize};

/// Serializable form of a whole roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub groups: Vec<GroupRecord>,
    pub people: Vec<PersonRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    pub capacity: u32,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub memberships: Vec<MembershipRecord>,
}

/// `role` holds a catalog role name or the `default` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRecord {
    pub group_name: String,
    pub role: String,
    pub attendance_count: u32,
}

impl RosterRecord {
    /// Exports `roster` into record form.
    pub fn from_roster(roster: &Roster) -> Self {
        Self {
            groups: roster.groups().iter().map(GroupRecord::from_group).collect(),
            people: roster.people().iter().map(PersonRecord::from_person).collect(),
        }
    }

    /// Rebuilds a roster, applying the same checks as in-memory mutation.
    ///
    /// # Errors
    /// - `ValidationFailed` for malformed field text.
    /// - `DuplicateGroup` / `DuplicatePerson` for repeated names.
    /// - `GroupNotFound` when a membership names an unknown group.
    /// - `RoleNotFound` when a membership role is not in its group's catalog.
    /// - `AttendanceCapExceeded` when a count is above its group's capacity.
    pub fn into_roster(self) -> RosterResult<Roster> {
        let mut roster = Roster::new();
        for group in &self.groups {
            roster = roster.add_group(group.to_group()?)?;
        }
        for person in &self.people {
            let person = person.to_person(&roster)?;
            roster = roster.add_person(person)?;
        }
        Ok(roster)
    }
}

impl GroupRecord {
    pub fn from_group(group: &Group) -> Self {
        Self {
            name: group.name().to_string(),
            capacity: group.capacity(),
            roles: group.roles().iter().map(ToString::to_string).collect(),
        }
    }

    fn to_group(&self) -> RosterResult<Group> {
        Ok(Group::parse(&self.name, self.capacity, &self.roles)?)
    }
}

impl PersonRecord {
    pub fn from_person(person: &Person) -> Self {
        Self {
            name: person.name().to_string(),
            phone: person.phone().to_string(),
            email: person.email().to_string(),
            address: person.address().to_string(),
            memberships: person
                .memberships()
                .map(MembershipRecord::from_membership)
                .collect(),
        }
    }

    fn to_person(&self, roster: &Roster) -> RosterResult<Person> {
        let memberships = self
            .memberships
            .iter()
            .map(|membership| membership.to_membership(roster))
            .collect::<RosterResult<Vec<_>>>()?;

        Ok(Person::new(
            Name::parse(&self.name)?,
            Phone::parse(&self.phone)?,
            Email::parse(&self.email)?,
            Address::parse(&self.address)?,
            memberships,
        )?)
    }
}

impl MembershipRecord {
    pub fn from_membership(membership: &Membership) -> Self {
        Self {
            group_name: membership.group_name().to_string(),
            role: membership.role().to_string(),
            attendance_count: membership.attendance().count(),
        }
    }

    fn to_membership(&self, roster: &Roster) -> RosterResult<Membership> {
        let group_name = GroupName::parse(&self.group_name)?;
        let group = roster
            .group(group_name.as_str())
            .ok_or_else(|| RosterError::GroupNotFound(group_name.to_string()))?;
        let role = Role::parse(&self.role)?;
        Membership::new(group.clone(), role, self.attendance_count)
    }
}

#[cfg(test)]
mod tests {
    use super::{GroupRecord, MembershipRecord, PersonRecord, RosterRecord};
    use crate::error::RosterError;

    fn record_with_membership(membership: MembershipRecord) -> RosterRecord {
        RosterRecord {
            groups: vec![GroupRecord {
                name: "Basketball".to_string(),
                capacity: 10,
                roles: vec!["Captain".to_string()],
            }],
            people: vec![PersonRecord {
                name: "Alice".to_string(),
                phone: "94351253".to_string(),
                email: "alice@example.com".to_string(),
                address: "123, Jurong West".to_string(),
                memberships: vec![membership],
            }],
        }
    }

    #[test]
    fn group_name_lookup_normalizes_whitespace() {
        let record = record_with_membership(MembershipRecord {
            group_name: " Basketball\t".to_string(),
            role: "default".to_string(),
            attendance_count: 0,
        });
        let roster = record.into_roster().expect("roster");
        assert!(roster.people()[0].has_membership("Basketball"));
    }

    #[test]
    fn unknown_role_fails_whole_load() {
        let record = record_with_membership(MembershipRecord {
            group_name: "Basketball".to_string(),
            role: "Coach".to_string(),
            attendance_count: 0,
        });
        assert!(matches!(
            record.into_roster(),
            Err(RosterError::RoleNotFound { .. })
        ));
    }
}
