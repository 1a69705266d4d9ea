use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::info;

use super::courses::seed_courses;
use crate::error::{RecordError, Result};

/// Open the SQLite file at `path`, creating its parent directory when needed.
/// Every connection gets `PRAGMA foreign_keys = ON` so the references declared
/// on `enrollments` are checked the same way in tests and real runs.
pub fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RecordError::DataDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let unavailable = |source| RecordError::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let conn = Connection::open(path).map_err(unavailable)?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(unavailable)?;
    Ok(conn)
}

/// Create the three tables if they are missing and seed the course catalog
/// when it is empty. Safe to call on every start; returns how many courses
/// were seeded by this call.
pub fn ensure_schema(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS students (
            uid INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            contact TEXT NOT NULL,
            email TEXT NOT NULL,
            age INTEGER NOT NULL
        )",
        [],
    )?;

    tx.execute(
        "CREATE TABLE IF NOT EXISTS courses (
            course_id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_name TEXT UNIQUE NOT NULL,
            duration TEXT,
            fee REAL
        )",
        [],
    )?;

    // UNIQUE(student_id) keeps every student at one enrollment at most.
    tx.execute(
        "CREATE TABLE IF NOT EXISTS enrollments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER UNIQUE,
            course_id INTEGER,
            FOREIGN KEY(student_id) REFERENCES students(uid),
            FOREIGN KEY(course_id) REFERENCES courses(course_id)
        )",
        [],
    )?;

    let seeded = seed_courses(&tx)?;
    tx.commit()?;

    if seeded > 0 {
        info!(seeded, "seeded default course catalog");
    }
    Ok(seeded)
}
