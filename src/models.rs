//! Domain models that mirror the SQLite schema and get passed between the
//! record store and the TUI. These stay plain data holders so the other layers
//! can focus on persistence and presentation.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A row of the `students` table.
pub struct Student {
    /// User-chosen identifier. Doubles as the SQLite rowid, so it never
    /// changes once the row exists.
    pub uid: i64,
    pub name: String,
    /// Exactly ten digits, kept as text so leading zeros survive.
    pub contact: String,
    pub email: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq)]
/// A row of the `courses` table. Courses are only ever seeded, never edited.
pub struct Course {
    pub course_id: i64,
    pub course_name: String,
    /// Free-text label such as "3 Months".
    pub duration: String,
    pub fee: f64,
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.course_name)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// One line of the enrollments view: a student joined with the course they
/// are enrolled in.
pub struct EnrollmentRow {
    pub uid: i64,
    pub name: String,
    pub course_name: String,
    pub duration: String,
    pub fee: f64,
}

/// Raw form input exactly as the user typed it. Nothing here has been trimmed
/// or parsed; the validators decide what is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub uid: String,
    pub name: String,
    pub contact: String,
    pub email: String,
    pub age: String,
    pub course_name: String,
}

/// Names a single form field, used to report which inputs failed validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Uid,
    Name,
    Contact,
    Email,
    Age,
    Course,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Uid => "UID",
            Field::Name => "Name",
            Field::Contact => "Contact",
            Field::Email => "Email",
            Field::Age => "Age",
            Field::Course => "Course",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
