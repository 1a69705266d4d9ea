use rusqlite::{params, Connection, Error as SqlError, ErrorCode};

use crate::error::{RecordError, Result};
use crate::models::Student;

/// Retrieve every student ordered by UID.
pub fn fetch_students(conn: &Connection) -> Result<Vec<Student>> {
    let mut stmt =
        conn.prepare("SELECT uid, name, contact, email, age FROM students ORDER BY uid")?;

    let students = stmt
        .query_map([], |row| {
            Ok(Student {
                uid: row.get(0)?,
                name: row.get(1)?,
                contact: row.get(2)?,
                email: row.get(3)?,
                age: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(students)
}

/// Insert a new student row. A UID that is already taken comes back as
/// [`RecordError::DuplicateKey`].
pub fn insert_student(conn: &Connection, student: &Student) -> Result<()> {
    conn.execute(
        "INSERT INTO students (uid, name, contact, email, age) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            student.uid,
            student.name,
            student.contact,
            student.email,
            student.age
        ],
    )
    .map_err(|err| map_unique_constraint(err, student.uid))?;
    Ok(())
}

/// Overwrite the mutable fields of an existing student. Returns the number of
/// rows touched, which is zero when the UID is unknown.
pub fn update_student(conn: &Connection, student: &Student) -> Result<usize> {
    let updated = conn.execute(
        "UPDATE students SET name = ?1, contact = ?2, email = ?3, age = ?4 WHERE uid = ?5",
        params![
            student.name,
            student.contact,
            student.email,
            student.age,
            student.uid
        ],
    )?;
    Ok(updated)
}

/// Remove a student row. Enrollments must already be gone, the foreign key on
/// `enrollments.student_id` rejects the delete otherwise.
pub fn delete_student(conn: &Connection, uid: i64) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM students WHERE uid = ?1", params![uid])?;
    Ok(deleted)
}

/// Coerce the primary-key violation into the duplicate-UID error. Any other
/// failure stays a plain storage error.
fn map_unique_constraint(err: SqlError, uid: i64) -> RecordError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        RecordError::DuplicateKey(uid)
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ensure_schema;

    fn seeded() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        ensure_schema(&mut conn).unwrap();
        conn
    }

    fn student(uid: i64, name: &str) -> Student {
        Student {
            uid,
            name: name.to_string(),
            contact: "0123456789".to_string(),
            email: format!("{}@school.test", name.to_lowercase()),
            age: 20,
        }
    }

    #[test]
    fn students_come_back_in_uid_order() {
        let conn = seeded();
        insert_student(&conn, &student(30, "Cy")).unwrap();
        insert_student(&conn, &student(10, "Al")).unwrap();
        insert_student(&conn, &student(20, "Bo")).unwrap();

        let uids: Vec<i64> = fetch_students(&conn)
            .unwrap()
            .into_iter()
            .map(|s| s.uid)
            .collect();
        assert_eq!(uids, vec![10, 20, 30]);
    }

    #[test]
    fn duplicate_uid_is_classified() {
        let conn = seeded();
        insert_student(&conn, &student(1, "Al")).unwrap();
        let err = insert_student(&conn, &student(1, "Bo")).unwrap_err();
        assert!(matches!(err, RecordError::DuplicateKey(1)));
        assert_eq!(fetch_students(&conn).unwrap()[0].name, "Al");
    }

    #[test]
    fn update_and_delete_report_row_counts() {
        let conn = seeded();
        insert_student(&conn, &student(5, "Al")).unwrap();

        let mut changed = student(5, "Alex");
        changed.age = 44;
        assert_eq!(update_student(&conn, &changed).unwrap(), 1);
        assert_eq!(update_student(&conn, &student(6, "Nobody")).unwrap(), 0);
        assert_eq!(fetch_students(&conn).unwrap(), vec![changed]);

        assert_eq!(delete_student(&conn, 6).unwrap(), 0);
        assert_eq!(delete_student(&conn, 5).unwrap(), 1);
        assert!(fetch_students(&conn).unwrap().is_empty());
    }
}
