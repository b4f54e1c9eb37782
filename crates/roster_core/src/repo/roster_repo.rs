//! Whole-state roster persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Split persistence into independent read and write capabilities.
//! - Save and load the complete roster between process runs.
//!
//! # Invariants
//! - `save_roster` replaces all persisted roster rows in one transaction.
//! - `load_roster` re-validates every roster invariant and fails the whole
//!   load on the first violation.
//! - Rows are read back in the order they were saved.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::error::RosterError;
use crate::model::roster::Roster;
use crate::repo::record::{GroupRecord, MembershipRecord, PersonRecord, RosterRecord};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const REQUIRED_TABLES: &[&str] = &[
    "roster_groups",
    "group_roles",
    "people",
    "memberships",
    "roster_meta",
];

pub type StoreResult<T> = Result<T, StoreError>;

/// Error from roster persistence.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Persisted rows describe a roster that breaks a core invariant.
    Roster(RosterError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    /// Persisted value cannot be converted to its record field.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Roster(err) => write!(f, "invalid persisted roster: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "roster store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "roster store requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Roster(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RosterError> for StoreError {
    fn from(value: RosterError) -> Self {
        Self::Roster(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read capability: load a whole roster.
pub trait RosterReader {
    fn load_roster(&self) -> StoreResult<Roster>;
}

/// Write capability: persist a whole roster.
pub trait RosterWriter {
    fn save_roster(&self, roster: &Roster) -> StoreResult<()>;
}

/// SQLite-backed roster store implementing both capabilities.
pub struct SqliteRosterStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterStore<'conn> {
    /// Creates a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Epoch milliseconds of the last successful save, if any.
    pub fn last_saved_at(&self) -> StoreResult<Option<i64>> {
        let saved_at = self
            .conn
            .query_row("SELECT saved_at FROM roster_meta WHERE id = 1;", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(saved_at)
    }

    fn read_record(&self) -> StoreResult<RosterRecord> {
        let mut group_stmt = self
            .conn
            .prepare("SELECT name, capacity FROM roster_groups ORDER BY position ASC;")?;
        let mut role_stmt = self.conn.prepare(
            "SELECT role_name FROM group_roles WHERE group_name = ?1 ORDER BY position ASC;",
        )?;
        let mut groups = Vec::new();
        let mut rows = group_stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let capacity = to_u32(row.get("capacity")?, "roster_groups.capacity")?;
            let roles = role_stmt
                .query_map([name.as_str()], |role_row| role_row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            groups.push(GroupRecord {
                name,
                capacity,
                roles,
            });
        }

        let mut person_stmt = self.conn.prepare(
            "SELECT name, phone, email, address FROM people ORDER BY position ASC;",
        )?;
        let mut membership_stmt = self.conn.prepare(
            "SELECT group_name, role, attendance_count
             FROM memberships
             WHERE person_name = ?1
             ORDER BY group_name ASC;",
        )?;
        let mut people = Vec::new();
        let mut rows = person_stmt.query([])?;
        while let Some(row) = rows.next()? {
            let name: String = row.get("name")?;
            let mut memberships = Vec::new();
            let mut membership_rows = membership_stmt.query([name.as_str()])?;
            while let Some(membership_row) = membership_rows.next()? {
                memberships.push(MembershipRecord {
                    group_name: membership_row.get("group_name")?,
                    role: membership_row.get("role")?,
                    attendance_count: to_u32(
                        membership_row.get("attendance_count")?,
                        "memberships.attendance_count",
                    )?,
                });
            }
            people.push(PersonRecord {
                name,
                phone: row.get("phone")?,
                email: row.get("email")?,
                address: row.get("address")?,
                memberships,
            });
        }

        Ok(RosterRecord { groups, people })
    }

    fn write_record(&self, record: &RosterRecord) -> StoreResult<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        tx.execute_batch(
            "DELETE FROM memberships;
             DELETE FROM people;
             DELETE FROM group_roles;
             DELETE FROM roster_groups;",
        )?;

        for (position, group) in record.groups.iter().enumerate() {
            tx.execute(
                "INSERT INTO roster_groups (name, capacity, position) VALUES (?1, ?2, ?3);",
                params![group.name, group.capacity, position as i64],
            )?;
            for (role_position, role) in group.roles.iter().enumerate() {
                tx.execute(
                    "INSERT INTO group_roles (group_name, role_name, position)
                     VALUES (?1, ?2, ?3);",
                    params![group.name, role, role_position as i64],
                )?;
            }
        }

        for (position, person) in record.people.iter().enumerate() {
            tx.execute(
                "INSERT INTO people (name, phone, email, address, position)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    person.name,
                    person.phone,
                    person.email,
                    person.address,
                    position as i64
                ],
            )?;
            for membership in &person.memberships {
                tx.execute(
                    "INSERT INTO memberships (person_name, group_name, role, attendance_count)
                     VALUES (?1, ?2, ?3, ?4);",
                    params![
                        person.name,
                        membership.group_name,
                        membership.role,
                        membership.attendance_count
                    ],
                )?;
            }
        }

        tx.execute(
            "INSERT INTO roster_meta (id, saved_at)
             VALUES (1, (strftime('%s', 'now') * 1000))
             ON CONFLICT(id) DO UPDATE SET saved_at = excluded.saved_at;",
            [],
        )?;
        tx.commit()?;
        Ok(())
    }
}

impl RosterReader for SqliteRosterStore<'_> {
    fn load_roster(&self) -> StoreResult<Roster> {
        let started_at = Instant::now();
        let result = self
            .read_record()
            .and_then(|record| record.into_roster().map_err(StoreError::from));

        match &result {
            Ok(roster) => info!(
                "event=roster_load module=repo status=ok people={} groups={} duration_ms={}",
                roster.people().len(),
                roster.groups().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=roster_load module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

impl RosterWriter for SqliteRosterStore<'_> {
    fn save_roster(&self, roster: &Roster) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.write_record(&RosterRecord::from_roster(roster));

        match &result {
            Ok(()) => info!(
                "event=roster_save module=repo status=ok people={} groups={} duration_ms={}",
                roster.people().len(),
                roster.groups().len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=roster_save module=repo status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn to_u32(value: i64, column: &str) -> StoreResult<u32> {
    u32::try_from(value)
        .map_err(|_| StoreError::InvalidData(format!("value `{value}` out of range in {column}")))
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(StoreError::MissingRequiredTable(table));
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
