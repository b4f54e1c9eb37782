//! Roster aggregate: people, groups and the references between them.
//!
//! # Responsibility
//! - Enforce uniqueness of people (by name) and groups (by name).
//! - Keep every membership pointing at a group that is present in the roster.
//! - Cascade group updates and removals into the people holding memberships.
//!
//! # Invariants
//! - Both collections keep insertion order; `set_*` replaces in place.
//! - Every membership holds a group value equal to the roster's copy.
//! - Mutators return a new roster or an error; the receiver never changes.

use crate::error::{RosterError, RosterResult};
use crate::model::fields::normalize_lookup;
use crate::model::group::Group;
use crate::model::person::Person;

/// Aggregate store for one roster state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    people: Vec<Person>,
    groups: Vec<Group>,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// People in insertion order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Groups in insertion order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Person whose name matches `name` after whitespace normalization.
    pub fn person(&self, name: &str) -> Option<&Person> {
        let name = normalize_lookup(name);
        self.people
            .iter()
            .find(|person| person.name().as_str() == name)
    }

    /// Group whose name matches `name` after whitespace normalization.
    pub fn group(&self, name: &str) -> Option<&Group> {
        let name = normalize_lookup(name);
        self.groups.iter().find(|group| group.name().as_str() == name)
    }

    /// Returns whether a person with the same name exists.
    pub fn has_person(&self, person: &Person) -> bool {
        self.people.iter().any(|existing| existing.is_same_person(person))
    }

    /// Returns whether a group with the same name exists.
    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.iter().any(|existing| existing.is_same_group(group))
    }

    /// People holding a membership in `group_name`, in roster order.
    pub fn members_of<'a>(&'a self, group_name: &'a str) -> impl Iterator<Item = &'a Person> + 'a {
        self.people
            .iter()
            .filter(move |person| person.has_membership(group_name))
    }

    /// Appends `person`.
    ///
    /// # Errors
    /// - `DuplicatePerson` when a person with the same name exists.
    /// - `GroupNotFound` when a membership names a group not in this roster.
    pub fn add_person(&self, person: Person) -> RosterResult<Self> {
        if self.has_person(&person) {
            return Err(RosterError::DuplicatePerson(person.name().to_string()));
        }
        self.ensure_memberships_resolve(&person)?;

        let mut next = self.clone();
        next.people.push(person);
        Ok(next)
    }

    /// Replaces `target` with `edited` at the same position.
    ///
    /// # Errors
    /// - `PersonNotFound` when `target` is absent.
    /// - `DuplicatePerson` when `edited` renames onto another existing person.
    /// - `GroupNotFound` when a membership names a group not in this roster.
    pub fn set_person(&self, target: &Person, edited: Person) -> RosterResult<Self> {
        let index = self
            .person_index(target)
            .ok_or_else(|| RosterError::PersonNotFound(target.name().to_string()))?;
        if !target.is_same_person(&edited) && self.has_person(&edited) {
            return Err(RosterError::DuplicatePerson(edited.name().to_string()));
        }
        self.ensure_memberships_resolve(&edited)?;

        let mut next = self.clone();
        next.people[index] = edited;
        Ok(next)
    }

    /// Removes the person with `target`'s name.
    pub fn remove_person(&self, target: &Person) -> RosterResult<Self> {
        let index = self
            .person_index(target)
            .ok_or_else(|| RosterError::PersonNotFound(target.name().to_string()))?;

        let mut next = self.clone();
        next.people.remove(index);
        Ok(next)
    }

    /// Appends `group`.
    ///
    /// # Errors
    /// - `DuplicateGroup` when a group with the same name exists.
    pub fn add_group(&self, group: Group) -> RosterResult<Self> {
        if self.has_group(&group) {
            return Err(RosterError::DuplicateGroup(group.name().to_string()));
        }

        let mut next = self.clone();
        next.groups.push(group);
        Ok(next)
    }

    /// Replaces `target` with `edited` and rebinds every membership to it.
    ///
    /// Members keep their role and attendance; the update fails as a whole
    /// when any member's role or count is invalid under `edited`.
    ///
    /// # Errors
    /// - `GroupNotFound` when `target` is absent.
    /// - `DuplicateGroup` when `edited` renames onto another existing group.
    /// - `RoleNotFound` / `AttendanceCapExceeded` from rebinding a member.
    pub fn set_group(&self, target: &Group, edited: Group) -> RosterResult<Self> {
        let index = self
            .group_index(target)
            .ok_or_else(|| RosterError::GroupNotFound(target.name().to_string()))?;
        if !target.is_same_group(&edited) && self.has_group(&edited) {
            return Err(RosterError::DuplicateGroup(edited.name().to_string()));
        }

        let old_name = self.groups[index].name().as_str();
        let people = self
            .people
            .iter()
            .map(|person| person.rebind_group(old_name, &edited))
            .collect::<RosterResult<Vec<_>>>()?;

        let mut groups = self.groups.clone();
        groups[index] = edited;
        Ok(Self { people, groups })
    }

    /// Removes `target` and strips its membership from every person.
    ///
    /// # Errors
    /// - `GroupNotFound` when `target` is absent; nothing is stripped then.
    pub fn remove_group(&self, target: &Group) -> RosterResult<Self> {
        let index = self
            .group_index(target)
            .ok_or_else(|| RosterError::GroupNotFound(target.name().to_string()))?;

        let group_name = self.groups[index].name().as_str();
        let people = self
            .people
            .iter()
            .map(|person| person.leave(group_name))
            .collect::<Vec<_>>();

        let mut groups = self.groups.clone();
        groups.remove(index);
        Ok(Self { people, groups })
    }

    fn person_index(&self, target: &Person) -> Option<usize> {
        self.people
            .iter()
            .position(|person| person.is_same_person(target))
    }

    fn group_index(&self, target: &Group) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.is_same_group(target))
    }

    fn ensure_memberships_resolve(&self, person: &Person) -> RosterResult<()> {
        for membership in person.memberships() {
            let name = membership.group_name().as_str();
            match self.group(name) {
                Some(group) if group == membership.group() => {}
                _ => return Err(RosterError::GroupNotFound(name.to_string())),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Roster;
    use crate::error::RosterError;
    use crate::model::group::Group;
    use crate::model::person::Person;

    #[test]
    fn add_person_rejects_stale_group_copy() {
        let roster = Roster::new()
            .add_group(Group::parse("Chess", 8, Vec::<&str>::new()).expect("group"))
            .expect("add group");
        let stale = Group::parse("Chess", 4, Vec::<&str>::new()).expect("group");
        let person = Person::parse("Bob", "123", "bob@example.com", "Street")
            .expect("person")
            .join(stale)
            .expect("join");

        assert_eq!(
            roster.add_person(person),
            Err(RosterError::GroupNotFound("Chess".to_string()))
        );
    }

    #[test]
    fn receiver_is_unchanged_after_mutation() {
        let empty = Roster::new();
        let group = Group::parse("Chess", 8, Vec::<&str>::new()).expect("group");
        let next = empty.add_group(group.clone()).expect("add group");
        assert!(empty.groups().is_empty());
        assert!(next.has_group(&group));
    }
}
