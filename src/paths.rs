//! Locations of the files the application keeps under the user's home.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-records";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "students.db";
/// Log file written next to the database; the terminal itself belongs to the UI.
const LOG_FILE_NAME: &str = "students.log";

/// Resolve the application data directory inside the user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Full path to the SQLite database file.
pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

/// Full path to the log file that tracing writes to.
pub fn log_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_in_the_data_directory() {
        let dir = data_dir().unwrap();
        assert!(dir.ends_with(DATA_DIR_NAME));
        assert_eq!(db_path().unwrap(), dir.join("students.db"));
        assert_eq!(log_path().unwrap(), dir.join("students.log"));
    }
}
