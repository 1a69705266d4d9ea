//! Persistence module split across logical submodules. Each function wraps a
//! single statement against a borrowed connection; [`crate::store`] decides
//! how they are grouped into transactions.

mod connection;
mod courses;
mod enrollments;
mod students;

pub use connection::{ensure_schema, open_connection};
pub use courses::{fetch_courses, find_course, SEED_COURSES};
pub use enrollments::{delete_enrollments, fetch_enrollments, insert_enrollment, update_enrollment};
pub use students::{delete_student, fetch_students, insert_student, update_student};
