use rusqlite::{params, Connection, OptionalExtension};

use crate::error::Result;
use crate::models::Course;

/// Catalog inserted the first time the course table is found empty.
pub const SEED_COURSES: [(&str, &str, f64); 4] = [
    ("Python Programming", "3 Months", 300.0),
    ("Data Science", "6 Months", 700.0),
    ("Web Development", "4 Months", 500.0),
    ("Machine Learning", "6 Months", 800.0),
];

/// Insert [`SEED_COURSES`] if and only if `courses` has no rows. Callers wrap
/// this in a transaction so the catalog lands all at once or not at all.
pub(crate) fn seed_courses(conn: &Connection) -> Result<usize> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    let mut stmt =
        conn.prepare("INSERT INTO courses (course_name, duration, fee) VALUES (?1, ?2, ?3)")?;
    for (name, duration, fee) in SEED_COURSES {
        stmt.execute(params![name, duration, fee])?;
    }
    Ok(SEED_COURSES.len())
}

/// Every course in catalog order.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn.prepare(
        "SELECT course_id, course_name, COALESCE(duration, ''), COALESCE(fee, 0)
         FROM courses
         ORDER BY course_id",
    )?;

    let courses = stmt
        .query_map([], |row| {
            Ok(Course {
                course_id: row.get(0)?,
                course_name: row.get(1)?,
                duration: row.get(2)?,
                fee: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(courses)
}

/// Resolve a course by its exact name.
pub fn find_course(conn: &Connection, course_name: &str) -> Result<Option<Course>> {
    let course = conn
        .query_row(
            "SELECT course_id, course_name, COALESCE(duration, ''), COALESCE(fee, 0)
             FROM courses
             WHERE course_name = ?1",
            [course_name],
            |row| {
                Ok(Course {
                    course_id: row.get(0)?,
                    course_name: row.get(1)?,
                    duration: row.get(2)?,
                    fee: row.get(3)?,
                })
            },
        )
        .optional()?;
    Ok(course)
}
