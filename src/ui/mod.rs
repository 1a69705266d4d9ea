//! Ratatui front-end: a Students tab with the entry form and student table,
//! and an Enrollments tab showing who takes which course. All UI state lives
//! in [`App`]; the record store is only called through its public operations.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
