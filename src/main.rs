//! Binary entry point: bring up logging and the SQLite store, hydrate the
//! initial app state, and drive the Ratatui event loop until the user exits.
use std::fs::{self, File};
use std::sync::Mutex;

use anyhow::{Context, Result};
use student_records_manager::{paths, run_app, App, RecordStore};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to the log file; stdout belongs to the TUI.
fn init_logging() -> Result<()> {
    let log_path = paths::log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let store = RecordStore::open(paths::db_path()?)
        .context("failed to initialize the student store")?;
    let courses = store.list_courses()?;
    let students = store.list_students()?;
    let enrollments = store.list_enrollments()?;
    info!(
        students = students.len(),
        enrollments = enrollments.len(),
        "starting student records manager"
    );

    let mut app = App::new(store, courses, students, enrollments);
    run_app(&mut app)
}
