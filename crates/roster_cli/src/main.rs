//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `roster_core` linkage.
//! - Optionally open a roster database and report its size.
//!
//! Usage: `roster_cli [DB_PATH]`. Without a path an in-memory store is used.

use roster_core::{RosterReader, SqliteRosterStore};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("roster_core ping={}", roster_core::ping());
    println!("roster_core version={}", roster_core::core_version());

    match probe_store(std::env::args().nth(1)) {
        Ok((people, groups)) => {
            println!("roster people={people} groups={groups}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("roster probe failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn probe_store(path: Option<String>) -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let conn = match path {
        Some(path) => roster_core::open_db(path)?,
        None => roster_core::open_db_in_memory()?,
    };
    let store = SqliteRosterStore::try_new(&conn)?;
    let roster = store.load_roster()?;
    Ok((roster.people().len(), roster.groups().len()))
}
