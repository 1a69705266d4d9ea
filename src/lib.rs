//! Core library for the Student Records Manager TUI.
//!
//! The persistence layer (`db`), the validators and the [`RecordStore`] that
//! ties them together carry no UI state, so they can be driven from tests or
//! other front-ends as easily as from the bundled terminal UI.
pub mod db;
pub mod error;
pub mod models;
pub mod paths;
pub mod store;
pub mod ui;
pub mod validate;

pub use db::SEED_COURSES;
pub use error::RecordError;
pub use models::{Course, EnrollmentRow, Field, Student, StudentInput};
pub use store::RecordStore;
pub use validate::{validate_age, validate_contact, validate_email, validate_name, validate_uid};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
