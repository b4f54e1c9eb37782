//! Snapshot-based versioning of the roster aggregate.

use crate::error::{RosterError, RosterResult};
use crate::model::roster::Roster;
use std::sync::Arc;

/// Roster with a committed snapshot sequence and cursor.
///
/// The working state is what mutations replace; `commit` records it as the
/// next snapshot. Snapshots are shared `Arc`s, so a reader holding one is
/// unaffected by later commits, undos or redos.
#[derive(Debug, Clone)]
pub struct VersionedRoster {
    working: Arc<Roster>,
    states: Vec<Arc<Roster>>,
    cursor: usize,
}

impl VersionedRoster {
    /// Starts history with `initial` as the only snapshot.
    pub fn new(initial: Roster) -> Self {
        let initial = Arc::new(initial);
        Self {
            working: Arc::clone(&initial),
            states: vec![initial],
            cursor: 0,
        }
    }

    /// Current working state.
    pub fn current(&self) -> Arc<Roster> {
        Arc::clone(&self.working)
    }

    /// Borrowed view of the working state.
    pub fn roster(&self) -> &Roster {
        &self.working
    }

    /// Replaces the working state. Nothing is recorded until `commit`.
    pub fn replace(&mut self, roster: Roster) {
        self.working = Arc::new(roster);
    }

    /// Applies a roster transformation to the working state.
    ///
    /// On error the working state is left as it was.
    pub fn apply(&mut self, op: impl FnOnce(&Roster) -> RosterResult<Roster>) -> RosterResult<()> {
        let next = op(&self.working)?;
        self.working = Arc::new(next);
        Ok(())
    }

    /// Records the working state after the cursor, dropping any redo tail.
    pub fn commit(&mut self) {
        self.states.truncate(self.cursor + 1);
        self.states.push(Arc::clone(&self.working));
        self.cursor += 1;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.states.len()
    }

    /// Restores the previous snapshot.
    pub fn undo(&mut self) -> RosterResult<()> {
        if !self.can_undo() {
            return Err(RosterError::NoPreviousState);
        }
        self.cursor -= 1;
        self.working = Arc::clone(&self.states[self.cursor]);
        Ok(())
    }

    /// Restores the next snapshot.
    pub fn redo(&mut self) -> RosterResult<()> {
        if !self.can_redo() {
            return Err(RosterError::NoNextState);
        }
        self.cursor += 1;
        self.working = Arc::clone(&self.states[self.cursor]);
        Ok(())
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Snapshot at `index`, if stored.
    pub fn snapshot(&self, index: usize) -> Option<Arc<Roster>> {
        self.states.get(index).map(Arc::clone)
    }
}

impl Default for VersionedRoster {
    fn default() -> Self {
        Self::new(Roster::new())
    }
}
