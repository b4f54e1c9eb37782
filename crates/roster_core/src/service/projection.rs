//! Filtered, read-only projection of roster people.
//!
//! # Responsibility
//! - Define person predicates used to narrow the visible list.
//! - Compute the matching people for one roster snapshot.
//!
//! # Invariants
//! - A projection never exposes a way to mutate the roster it was computed from.
//! - Matching people keep roster insertion order.

use crate::model::fields::normalize_lookup;
use crate::model::person::Person;
use crate::model::roster::Roster;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Predicate deciding whether a person is visible in the projection.
pub trait PersonPredicate: Send + Sync {
    fn matches(&self, person: &Person) -> bool;
}

impl<F> PersonPredicate for F
where
    F: Fn(&Person) -> bool + Send + Sync,
{
    fn matches(&self, person: &Person) -> bool {
        self(person)
    }
}

/// Matches every person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowAll;

impl PersonPredicate for ShowAll {
    fn matches(&self, _person: &Person) -> bool {
        true
    }
}

/// Matches people whose name contains any keyword as a whole word.
///
/// Comparison ignores case. Blank keywords are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameContainsKeywords {
    keywords: Vec<String>,
}

impl NameContainsKeywords {
    pub fn new<S: AsRef<str>>(keywords: impl IntoIterator<Item = S>) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().trim().to_lowercase())
            .filter(|keyword| !keyword.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl PersonPredicate for NameContainsKeywords {
    fn matches(&self, person: &Person) -> bool {
        let name = person.name().as_str().to_lowercase();
        name.split_whitespace()
            .any(|word| self.keywords.iter().any(|keyword| keyword == word))
    }
}

/// Matches people holding a membership in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberOf {
    group_name: String,
}

impl MemberOf {
    pub fn new(group_name: impl AsRef<str>) -> Self {
        Self {
            group_name: normalize_lookup(group_name.as_ref()).into_owned(),
        }
    }
}

impl PersonPredicate for MemberOf {
    fn matches(&self, person: &Person) -> bool {
        person.has_membership(&self.group_name)
    }
}

/// People of one roster snapshot that matched a predicate.
///
/// Holds the snapshot it was computed from, so it stays valid after the
/// model moves on to newer states.
#[derive(Clone)]
pub struct FilteredPeople {
    roster: Arc<Roster>,
    indices: Vec<usize>,
}

impl FilteredPeople {
    /// Eagerly evaluates `predicate` over every person in `roster`.
    pub fn compute(roster: Arc<Roster>, predicate: &dyn PersonPredicate) -> Self {
        let indices = roster
            .people()
            .iter()
            .enumerate()
            .filter(|(_, person)| predicate.matches(person))
            .map(|(index, _)| index)
            .collect();
        Self { roster, indices }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Person at projection position `index`.
    pub fn get(&self, index: usize) -> Option<&Person> {
        self.indices
            .get(index)
            .map(|&roster_index| &self.roster.people()[roster_index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> + '_ {
        self.indices
            .iter()
            .map(|&roster_index| &self.roster.people()[roster_index])
    }

    /// Snapshot this projection was computed from.
    pub fn source(&self) -> &Arc<Roster> {
        &self.roster
    }
}

/// Equal when both expose the same people from equal roster states.
impl PartialEq for FilteredPeople {
    fn eq(&self, other: &Self) -> bool {
        self.indices == other.indices
            && (Arc::ptr_eq(&self.roster, &other.roster) || self.roster == other.roster)
    }
}

impl Eq for FilteredPeople {}

impl Debug for FilteredPeople {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter().map(|p| p.name())).finish()
    }
}
