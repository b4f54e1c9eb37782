//! Roster model facade for the command and presentation layers.
//!
//! # Responsibility
//! - Route every mutation through the versioned roster.
//! - Keep the filtered projection in step with the working state.
//! - Expose commit/undo/redo to callers; mutators never commit on their own.
//!
//! # Invariants
//! - A failed mutation leaves the working state and history untouched.
//! - Reads and filter changes never alter history.
//! - Log events carry counts only, never person or group data.

use crate::error::{RosterError, RosterResult};
use crate::history::versioned::VersionedRoster;
use crate::model::group::{Group, Role};
use crate::model::person::Person;
use crate::model::roster::Roster;
use crate::service::projection::{FilteredPeople, PersonPredicate, ShowAll};
use log::debug;
use std::sync::Arc;

/// Single-writer model owning the roster history and current projection.
pub struct RosterModel {
    history: VersionedRoster,
    predicate: Arc<dyn PersonPredicate>,
    filtered: FilteredPeople,
}

impl RosterModel {
    /// Creates a model whose history starts at `initial`, showing everyone.
    pub fn new(initial: Roster) -> Self {
        let history = VersionedRoster::new(initial);
        let predicate: Arc<dyn PersonPredicate> = Arc::new(ShowAll);
        let filtered = FilteredPeople::compute(history.current(), predicate.as_ref());
        Self {
            history,
            predicate,
            filtered,
        }
    }

    /// Shared handle to the working roster state.
    pub fn roster(&self) -> Arc<Roster> {
        self.history.current()
    }

    pub fn has_person(&self, person: &Person) -> bool {
        self.history.roster().has_person(person)
    }

    pub fn has_group(&self, group: &Group) -> bool {
        self.history.roster().has_group(group)
    }

    pub fn person(&self, name: &str) -> Option<&Person> {
        self.history.roster().person(name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.history.roster().group(name)
    }

    pub fn add_person(&mut self, person: Person) -> RosterResult<()> {
        self.mutate("add_person", |roster| roster.add_person(person))
    }

    pub fn set_person(&mut self, target: &Person, edited: Person) -> RosterResult<()> {
        self.mutate("set_person", |roster| roster.set_person(target, edited))
    }

    pub fn remove_person(&mut self, target: &Person) -> RosterResult<()> {
        self.mutate("remove_person", |roster| roster.remove_person(target))
    }

    pub fn add_group(&mut self, group: Group) -> RosterResult<()> {
        self.mutate("add_group", |roster| roster.add_group(group))
    }

    pub fn set_group(&mut self, target: &Group, edited: Group) -> RosterResult<()> {
        self.mutate("set_group", |roster| roster.set_group(target, edited))
    }

    /// Removes `target` and every membership referencing it.
    pub fn remove_group(&mut self, target: &Group) -> RosterResult<()> {
        self.mutate("remove_group", |roster| roster.remove_group(target))
    }

    /// Records `amount` attended sessions for one person in one group.
    pub fn attend(
        &mut self,
        person_name: &str,
        group_name: &str,
        amount: u32,
    ) -> RosterResult<()> {
        self.update_person("attend", person_name, |person| {
            person.attend(group_name, amount)
        })
    }

    pub fn assign_role(
        &mut self,
        person_name: &str,
        group_name: &str,
        role: Role,
    ) -> RosterResult<()> {
        self.update_person("assign_role", person_name, |person| {
            person.assign_role(group_name, role)
        })
    }

    pub fn unassign_role(&mut self, person_name: &str, group_name: &str) -> RosterResult<()> {
        self.update_person("unassign_role", person_name, |person| {
            person.unassign_role(group_name)
        })
    }

    /// Installs a loaded roster as working state. Call `commit` to record it.
    pub fn replace_roster(&mut self, roster: Roster) {
        self.history.replace(roster);
        self.refresh_projection();
    }

    /// Changes the projection predicate and recomputes the projection.
    pub fn update_filter(&mut self, predicate: impl PersonPredicate + 'static) {
        self.predicate = Arc::new(predicate);
        self.refresh_projection();
    }

    /// Current read-only projection of people.
    pub fn filtered_people(&self) -> &FilteredPeople {
        &self.filtered
    }

    pub fn commit(&mut self) {
        self.history.commit();
        debug!(
            "event=history_commit module=model status=ok cursor={} states={}",
            self.history.cursor(),
            self.history.len()
        );
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> RosterResult<()> {
        let result = self.history.undo();
        self.log_navigation("history_undo", &result);
        result?;
        self.refresh_projection();
        Ok(())
    }

    pub fn redo(&mut self) -> RosterResult<()> {
        let result = self.history.redo();
        self.log_navigation("history_redo", &result);
        result?;
        self.refresh_projection();
        Ok(())
    }

    fn mutate(
        &mut self,
        op_name: &'static str,
        op: impl FnOnce(&Roster) -> RosterResult<Roster>,
    ) -> RosterResult<()> {
        match self.history.apply(op) {
            Ok(()) => {
                let roster = self.history.roster();
                debug!(
                    "event=roster_mutation module=model op={} status=ok people={} groups={}",
                    op_name,
                    roster.people().len(),
                    roster.groups().len()
                );
                self.refresh_projection();
                Ok(())
            }
            Err(err) => {
                debug!(
                    "event=roster_mutation module=model op={} status=rejected error_code={}",
                    op_name,
                    error_code(&err)
                );
                Err(err)
            }
        }
    }

    fn update_person(
        &mut self,
        op_name: &'static str,
        person_name: &str,
        op: impl FnOnce(&Person) -> RosterResult<Person>,
    ) -> RosterResult<()> {
        self.mutate(op_name, |roster| {
            let target = roster
                .person(person_name)
                .ok_or_else(|| RosterError::PersonNotFound(person_name.to_string()))?;
            let edited = op(target)?;
            roster.set_person(target, edited)
        })
    }

    fn refresh_projection(&mut self) {
        self.filtered = FilteredPeople::compute(self.history.current(), self.predicate.as_ref());
    }

    fn log_navigation(&self, event: &str, result: &RosterResult<()>) {
        match result {
            Ok(()) => debug!(
                "event={} module=model status=ok cursor={} states={}",
                event,
                self.history.cursor(),
                self.history.len()
            ),
            Err(err) => debug!(
                "event={} module=model status=rejected error_code={}",
                event,
                error_code(err)
            ),
        }
    }
}

/// Equal when the working rosters and the visible projections match.
///
/// History and the predicate object are not compared.
impl PartialEq for RosterModel {
    fn eq(&self, other: &Self) -> bool {
        self.history.roster() == other.history.roster() && self.filtered == other.filtered
    }
}

impl Default for RosterModel {
    fn default() -> Self {
        Self::new(Roster::new())
    }
}

/// Stable snake_case code for log lines.
fn error_code(err: &RosterError) -> &'static str {
    match err {
        RosterError::DuplicatePerson(_) => "duplicate_person",
        RosterError::PersonNotFound(_) => "person_not_found",
        RosterError::DuplicateGroup(_) => "duplicate_group",
        RosterError::GroupNotFound(_) => "group_not_found",
        RosterError::RoleNotFound { .. } => "role_not_found",
        RosterError::RoleAlreadyAssigned { .. } => "role_already_assigned",
        RosterError::DefaultRoleNotAllowed => "default_role_not_allowed",
        RosterError::NoRoleAssigned { .. } => "no_role_assigned",
        RosterError::AttendanceCapExceeded { .. } => "attendance_cap_exceeded",
        RosterError::NoPreviousState => "no_previous_state",
        RosterError::NoNextState => "no_next_state",
        RosterError::ValidationFailed(_) => "validation_failed",
    }
}
