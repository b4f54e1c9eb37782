//! Membership and attendance value types.
//!
//! # Responsibility
//! - Bind one person to one group with a role and a bounded attendance count.
//! - Provide the only transformations allowed on role and attendance.
//!
//! # Invariants
//! - `Attendance::count() <= Attendance::capacity()` always holds.
//! - A non-default role is present in the bound group's catalog.
//! - Transformations return new values; a rejected call leaves the receiver as is.

use crate::error::{RosterError, RosterResult};
use crate::model::fields::GroupName;
use crate::model::group::{Group, Role};
use std::fmt::{Display, Formatter};

/// Attendance counter bounded by the owning group's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attendance {
    count: u32,
    capacity: u32,
}

impl Attendance {
    /// Creates a counter at `count`.
    ///
    /// # Errors
    /// - `AttendanceCapExceeded` with `current = count` and nothing requested
    ///   when `count > capacity`.
    pub fn new(count: u32, capacity: u32) -> RosterResult<Self> {
        if count > capacity {
            return Err(RosterError::AttendanceCapExceeded {
                current: count,
                requested: 0,
                capacity,
            });
        }
        Ok(Self { count, capacity })
    }

    /// Zero sessions attended.
    pub fn empty(capacity: u32) -> Self {
        Self { count: 0, capacity }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns whether `amount` more sessions fit under the capacity.
    pub fn can_attend(&self, amount: u32) -> bool {
        self.count
            .checked_add(amount)
            .is_some_and(|total| total <= self.capacity)
    }

    /// Adds `amount` sessions. Rejected in full when the total would pass capacity.
    pub fn attend(&self, amount: u32) -> RosterResult<Self> {
        if !self.can_attend(amount) {
            return Err(RosterError::AttendanceCapExceeded {
                current: self.count,
                requested: amount,
                capacity: self.capacity,
            });
        }
        Ok(Self {
            count: self.count + amount,
            capacity: self.capacity,
        })
    }
}

impl Display for Attendance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.count, self.capacity)
    }
}

/// One person's involvement in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    group: Group,
    role: Role,
    attendance: Attendance,
}

impl Membership {
    /// New member of `group`: default role, nothing attended.
    pub fn join(group: Group) -> Self {
        let attendance = Attendance::empty(group.capacity());
        Self {
            group,
            role: Role::Default,
            attendance,
        }
    }

    /// Rebuilds a membership from stored parts.
    ///
    /// # Errors
    /// - `RoleNotFound` when `role` is not in the group's catalog.
    /// - `AttendanceCapExceeded` when `attendance_count` exceeds capacity.
    pub fn new(group: Group, role: Role, attendance_count: u32) -> RosterResult<Self> {
        if !group.has_role(&role) {
            return Err(role_not_found(&group, &role));
        }
        let attendance = Attendance::new(attendance_count, group.capacity())?;
        Ok(Self {
            group,
            role,
            attendance,
        })
    }

    pub fn group(&self) -> &Group {
        &self.group
    }

    pub fn group_name(&self) -> &GroupName {
        self.group.name()
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn attendance(&self) -> Attendance {
        self.attendance
    }

    pub fn is_default_role(&self) -> bool {
        self.role.is_default()
    }

    pub fn can_attend(&self, amount: u32) -> bool {
        self.attendance.can_attend(amount)
    }

    /// Assigns `new_role`. Only one non-default role may be held at a time.
    ///
    /// # Errors
    /// - `RoleAlreadyAssigned` when a non-default role is already held.
    /// - `DefaultRoleNotAllowed` when `new_role` is the default role.
    /// - `RoleNotFound` when `new_role` is not in the group's catalog.
    pub fn with_role(&self, new_role: Role) -> RosterResult<Self> {
        if !self.role.is_default() {
            return Err(RosterError::RoleAlreadyAssigned {
                group: self.group.name().to_string(),
                role: self.role.to_string(),
            });
        }
        if new_role.is_default() {
            return Err(RosterError::DefaultRoleNotAllowed);
        }
        if !self.group.has_role(&new_role) {
            return Err(role_not_found(&self.group, &new_role));
        }

        Ok(Self {
            group: self.group.clone(),
            role: new_role,
            attendance: self.attendance,
        })
    }

    /// Resets the role to default, keeping attendance.
    pub fn without_role(&self) -> RosterResult<Self> {
        if self.role.is_default() {
            return Err(RosterError::NoRoleAssigned {
                group: self.group.name().to_string(),
            });
        }

        Ok(Self {
            group: self.group.clone(),
            role: Role::Default,
            attendance: self.attendance,
        })
    }

    /// Records `amount` more attended sessions.
    pub fn with_attendance(&self, amount: u32) -> RosterResult<Self> {
        let attendance = self.attendance.attend(amount)?;
        Ok(Self {
            group: self.group.clone(),
            role: self.role.clone(),
            attendance,
        })
    }

    /// Re-points this membership at an updated version of its group.
    ///
    /// Role and count carry over and must still be valid under `group`.
    pub fn rebind(&self, group: Group) -> RosterResult<Self> {
        Self::new(group, self.role.clone(), self.attendance.count())
    }
}

impl Display for Membership {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | Role: {} | Attendance: {}",
            self.group.name(),
            self.role,
            self.attendance
        )
    }
}

fn role_not_found(group: &Group, role: &Role) -> RosterError {
    RosterError::RoleNotFound {
        group: group.name().to_string(),
        role: role.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{Attendance, Membership};
    use crate::error::RosterError;
    use crate::model::group::{Group, Role};

    fn basketball() -> Group {
        Group::parse("Basketball", 10, ["Captain", "Vice Captain"]).expect("group")
    }

    #[test]
    fn attendance_rejects_overflowing_increment() {
        let attendance = Attendance::new(3, 10).expect("attendance");
        assert!(!attendance.can_attend(u32::MAX));
        assert!(matches!(
            attendance.attend(u32::MAX),
            Err(RosterError::AttendanceCapExceeded { current: 3, .. })
        ));
    }

    #[test]
    fn overfull_stored_count_is_reported_as_current() {
        assert_eq!(
            Attendance::new(12, 10),
            Err(RosterError::AttendanceCapExceeded {
                current: 12,
                requested: 0,
                capacity: 10,
            })
        );
    }

    #[test]
    fn attendance_can_reach_capacity_exactly() {
        let attendance = Attendance::new(3, 10).expect("attendance");
        assert_eq!(attendance.attend(7).expect("fits").count(), 10);
    }

    #[test]
    fn new_rejects_unknown_role_and_overfull_count() {
        let captain = Role::parse("Coach").expect("role");
        assert!(matches!(
            Membership::new(basketball(), captain, 0),
            Err(RosterError::RoleNotFound { .. })
        ));
        assert!(matches!(
            Membership::new(basketball(), Role::Default, 11),
            Err(RosterError::AttendanceCapExceeded { capacity: 10, .. })
        ));
    }

    #[test]
    fn with_role_checks_current_role_first() {
        let membership = Membership::join(basketball())
            .with_role(Role::parse("Captain").expect("role"))
            .expect("assign captain");

        assert!(matches!(
            membership.with_role(Role::Default),
            Err(RosterError::RoleAlreadyAssigned { .. })
        ));
        assert!(matches!(
            membership.with_role(Role::parse("Unknown").expect("role")),
            Err(RosterError::RoleAlreadyAssigned { .. })
        ));
    }

    #[test]
    fn without_role_keeps_attendance() {
        let membership = Membership::join(basketball())
            .with_attendance(4)
            .and_then(|m| m.with_role(Role::parse("Captain").expect("role")))
            .expect("setup");

        let cleared = membership.without_role().expect("clear role");
        assert!(cleared.is_default_role());
        assert_eq!(cleared.attendance().count(), 4);
        assert_eq!(
            cleared.without_role(),
            Err(RosterError::NoRoleAssigned {
                group: "Basketball".to_string()
            })
        );
    }

    #[test]
    fn rebind_validates_against_new_group() {
        let membership = Membership::join(basketball())
            .with_attendance(8)
            .expect("attend");
        let smaller = Group::parse("Basketball", 5, ["Captain"]).expect("group");
        assert!(matches!(
            membership.rebind(smaller),
            Err(RosterError::AttendanceCapExceeded { capacity: 5, .. })
        ));

        let larger = Group::parse("Basketball", 20, Vec::<&str>::new()).expect("group");
        let rebound = membership.rebind(larger).expect("rebind");
        assert_eq!(rebound.attendance().capacity(), 20);
        assert_eq!(rebound.attendance().count(), 8);
    }
}
