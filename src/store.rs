//! The record store: the five operations the UI calls, plus the course list
//! for the picker. Each call opens its own connection, runs inside one
//! transaction and closes the connection again, so the store itself holds
//! nothing but the database path.
//!
//! Only one running instance is expected to write to a given database file.
//! Nothing here guards against a second writer beyond SQLite's own locking.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, info, warn};

use crate::db::{
    delete_enrollments, delete_student, ensure_schema, fetch_courses, fetch_enrollments,
    fetch_students, find_course, insert_enrollment, insert_student, open_connection,
    update_enrollment, update_student,
};
use crate::error::{RecordError, Result};
use crate::models::{Course, EnrollmentRow, Student, StudentInput};
use crate::validate::{check_for_add, check_for_update, parse_uid};

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    /// Prepare the database at `path`: create the tables and seed the course
    /// catalog on first use. Failing here means the application cannot start.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        let mut conn = store.connect()?;
        ensure_schema(&mut conn).map_err(|err| match err {
            RecordError::Storage(source) => RecordError::StoreUnavailable {
                path: store.path.clone(),
                source,
            },
            other => other,
        })?;
        info!(path = %store.path.display(), "student store ready");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        open_connection(&self.path)
    }

    /// Create a student and, when the course name resolves, enroll them.
    /// An unknown course still creates the student, just without an
    /// enrollment; the returned course is `None` in that case.
    pub fn add_student(&self, input: &StudentInput) -> Result<Option<Course>> {
        let student = check_for_add(input)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        insert_student(&tx, &student)?;

        let course = find_course(&tx, &input.course_name)?;
        match &course {
            Some(course) => insert_enrollment(&tx, student.uid, course.course_id)?,
            None => warn!(
                uid = student.uid,
                course = %input.course_name,
                "course not found, student added without enrollment"
            ),
        }
        tx.commit()?;

        info!(uid = student.uid, "student added");
        Ok(course)
    }

    /// Rewrite a student's fields and move their existing enrollment to the
    /// named course. A student with no enrollment does not gain one here.
    ///
    /// An unknown UID rolls the whole transaction back and reports
    /// [`RecordError::NotFound`]. Returns the course the enrollment now points
    /// at, or `None` when no enrollment row changed.
    pub fn update_student(&self, input: &StudentInput) -> Result<Option<Course>> {
        let student = check_for_update(input)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        if update_student(&tx, &student)? == 0 {
            return Err(RecordError::NotFound(student.uid));
        }

        let mut moved_to = None;
        if let Some(course) = find_course(&tx, &input.course_name)? {
            if update_enrollment(&tx, student.uid, course.course_id)? > 0 {
                moved_to = Some(course);
            }
        }
        tx.commit()?;

        info!(uid = student.uid, "student updated");
        Ok(moved_to)
    }

    /// Delete a student together with their enrollment. Having no enrollment
    /// is fine; an unknown UID is [`RecordError::NotFound`] and changes
    /// nothing.
    pub fn delete_student(&self, uid: &str) -> Result<()> {
        let uid = parse_uid(uid)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let enrollments = delete_enrollments(&tx, uid)?;
        if delete_student(&tx, uid)? == 0 {
            return Err(RecordError::NotFound(uid));
        }
        tx.commit()?;

        info!(uid, enrollments, "student deleted");
        Ok(())
    }

    /// Every student, enrolled or not, ordered by UID.
    pub fn list_students(&self) -> Result<Vec<Student>> {
        let conn = self.connect()?;
        let students = fetch_students(&conn)?;
        debug!(count = students.len(), "listed students");
        Ok(students)
    }

    /// Students joined with their course, ordered by UID. Students without
    /// an enrollment are left out.
    pub fn list_enrollments(&self) -> Result<Vec<EnrollmentRow>> {
        let conn = self.connect()?;
        let rows = fetch_enrollments(&conn)?;
        debug!(count = rows.len(), "listed enrollments");
        Ok(rows)
    }

    /// The course catalog in id order.
    pub fn list_courses(&self) -> Result<Vec<Course>> {
        let conn = self.connect()?;
        fetch_courses(&conn)
    }
}
