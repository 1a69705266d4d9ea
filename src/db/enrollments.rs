use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::EnrollmentRow;

/// Join students with their enrollment and course. Students without an
/// enrollment are left out.
pub fn fetch_enrollments(conn: &Connection) -> Result<Vec<EnrollmentRow>> {
    let mut stmt = conn.prepare(
        "SELECT s.uid, s.name, c.course_name, COALESCE(c.duration, ''), COALESCE(c.fee, 0)
         FROM students s
         INNER JOIN enrollments e ON s.uid = e.student_id
         INNER JOIN courses c ON e.course_id = c.course_id
         ORDER BY s.uid",
    )?;

    let rows = stmt
        .query_map([], |row| {
            Ok(EnrollmentRow {
                uid: row.get(0)?,
                name: row.get(1)?,
                course_name: row.get(2)?,
                duration: row.get(3)?,
                fee: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rows)
}

pub fn insert_enrollment(conn: &Connection, student_id: i64, course_id: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO enrollments (student_id, course_id) VALUES (?1, ?2)",
        params![student_id, course_id],
    )?;
    Ok(())
}

/// Point an existing enrollment at another course. Never inserts; returns the
/// number of rows changed.
pub fn update_enrollment(conn: &Connection, student_id: i64, course_id: i64) -> Result<usize> {
    let updated = conn.execute(
        "UPDATE enrollments SET course_id = ?1 WHERE student_id = ?2",
        params![course_id, student_id],
    )?;
    Ok(updated)
}

/// Drop every enrollment held by a student. Zero rows is a normal outcome.
pub fn delete_enrollments(conn: &Connection, student_id: i64) -> Result<usize> {
    let deleted = conn.execute(
        "DELETE FROM enrollments WHERE student_id = ?1",
        params![student_id],
    )?;
    Ok(deleted)
}
