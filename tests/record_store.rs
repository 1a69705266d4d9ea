//! End-to-end checks for `RecordStore` against a real database file.

use rusqlite::Connection;
use student_records_manager::{Field, RecordError, RecordStore, StudentInput, SEED_COURSES};
use tempfile::TempDir;

fn store() -> (TempDir, RecordStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = RecordStore::open(dir.path().join("students.db")).expect("open store");
    (dir, store)
}

fn input(uid: &str, course: &str) -> StudentInput {
    StudentInput {
        uid: uid.to_string(),
        name: format!("Student {uid}"),
        contact: "0123456789".to_string(),
        email: format!("student{uid}@college.test"),
        age: "21".to_string(),
        course_name: course.to_string(),
    }
}

fn row_count(store: &RecordStore, table: &str) -> i64 {
    let conn = Connection::open(store.path()).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

// ─── Schema ──────────────────────────────────────────────────────────────────

#[test]
fn opening_twice_keeps_four_courses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("students.db");
    RecordStore::open(&path).unwrap();
    let store = RecordStore::open(&path).unwrap();

    let courses = store.list_courses().unwrap();
    assert_eq!(courses.len(), 4);
    for (course, (name, duration, fee)) in courses.iter().zip(SEED_COURSES) {
        assert_eq!(course.course_name, name);
        assert_eq!(course.duration, duration);
        assert_eq!(course.fee, fee);
    }
}

#[test]
fn unusable_path_is_store_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a database file.
    let err = RecordStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, RecordError::StoreUnavailable { .. }), "{err:?}");
}

// ─── Add ─────────────────────────────────────────────────────────────────────

#[test]
fn add_creates_student_and_enrollment() {
    let (_dir, store) = store();
    let course = store.add_student(&input("7", "Data Science")).unwrap();
    assert_eq!(course.unwrap().course_name, "Data Science");

    let students = store.list_students().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].uid, 7);
    assert_eq!(students[0].age, 21);

    let enrollments = store.list_enrollments().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].uid, 7);
    assert_eq!(enrollments[0].course_name, "Data Science");
    assert_eq!(enrollments[0].duration, "6 Months");
    assert_eq!(enrollments[0].fee, 700.0);
}

#[test]
fn add_with_existing_uid_changes_nothing() {
    let (_dir, store) = store();
    store.add_student(&input("7", "Data Science")).unwrap();

    let err = store
        .add_student(&input("7", "Web Development"))
        .unwrap_err();
    assert!(matches!(err, RecordError::DuplicateKey(7)));
    assert_eq!(row_count(&store, "students"), 1);
    assert_eq!(row_count(&store, "enrollments"), 1);
    assert_eq!(
        store.list_enrollments().unwrap()[0].course_name,
        "Data Science"
    );
}

#[test]
fn add_with_unknown_course_skips_enrollment() {
    let (_dir, store) = store();
    let course = store.add_student(&input("3", "Underwater Basketry")).unwrap();
    assert!(course.is_none());
    assert_eq!(store.list_students().unwrap().len(), 1);
    assert!(store.list_enrollments().unwrap().is_empty());
}

#[test]
fn add_rejects_invalid_fields_before_touching_storage() {
    let (_dir, store) = store();
    let bad = StudentInput {
        email: "not-an-email".to_string(),
        course_name: String::new(),
        ..input("x1", "Data Science")
    };
    let err = store.add_student(&bad).unwrap_err();
    assert_eq!(err.invalid_fields(), &[Field::Uid, Field::Email, Field::Course]);
    assert_eq!(row_count(&store, "students"), 0);
}

#[test]
fn name_is_stored_trimmed() {
    let (_dir, store) = store();
    let padded = StudentInput {
        name: "  Grace Hopper  ".to_string(),
        ..input("11", "Machine Learning")
    };
    store.add_student(&padded).unwrap();
    assert_eq!(store.list_students().unwrap()[0].name, "Grace Hopper");
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[test]
fn update_moves_enrollment_without_duplicating() {
    let (_dir, store) = store();
    store.add_student(&input("5", "Python Programming")).unwrap();

    let changed = StudentInput {
        name: "Renamed".to_string(),
        age: "30".to_string(),
        ..input("5", "Machine Learning")
    };
    let course = store.update_student(&changed).unwrap();
    assert_eq!(course.unwrap().course_name, "Machine Learning");

    let enrollments = store.list_enrollments().unwrap();
    assert_eq!(enrollments.len(), 1);
    assert_eq!(enrollments[0].name, "Renamed");
    assert_eq!(enrollments[0].course_name, "Machine Learning");
    assert_eq!(row_count(&store, "enrollments"), 1);
    assert_eq!(store.list_students().unwrap()[0].age, 30);
}

#[test]
fn update_does_not_create_missing_enrollment() {
    let (_dir, store) = store();
    store.add_student(&input("5", "No Such Course")).unwrap();

    let course = store.update_student(&input("5", "Data Science")).unwrap();
    assert!(course.is_none());
    assert!(store.list_enrollments().unwrap().is_empty());
}

#[test]
fn update_with_blank_course_keeps_enrollment() {
    let (_dir, store) = store();
    store.add_student(&input("5", "Web Development")).unwrap();

    store.update_student(&input("5", "")).unwrap();
    assert_eq!(
        store.list_enrollments().unwrap()[0].course_name,
        "Web Development"
    );
}

#[test]
fn update_unknown_student_is_not_found() {
    let (_dir, store) = store();
    store.add_student(&input("1", "Data Science")).unwrap();

    let err = store
        .update_student(&input("2", "Machine Learning"))
        .unwrap_err();
    assert!(matches!(err, RecordError::NotFound(2)));
    assert_eq!(store.list_students().unwrap().len(), 1);
    assert_eq!(
        store.list_enrollments().unwrap()[0].course_name,
        "Data Science"
    );
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[test]
fn delete_removes_student_from_both_views() {
    let (_dir, store) = store();
    store.add_student(&input("1", "Data Science")).unwrap();
    store.add_student(&input("2", "Web Development")).unwrap();

    store.delete_student("1").unwrap();

    let uids: Vec<i64> = store.list_students().unwrap().iter().map(|s| s.uid).collect();
    assert_eq!(uids, vec![2]);
    let enrolled: Vec<i64> = store
        .list_enrollments()
        .unwrap()
        .iter()
        .map(|e| e.uid)
        .collect();
    assert_eq!(enrolled, vec![2]);
}

#[test]
fn delete_student_without_enrollment_succeeds() {
    let (_dir, store) = store();
    store.add_student(&input("4", "Not Offered")).unwrap();
    store.delete_student("4").unwrap();
    assert!(store.list_students().unwrap().is_empty());
}

#[test]
fn delete_unknown_student_is_not_found() {
    let (_dir, store) = store();
    store.add_student(&input("1", "Data Science")).unwrap();

    let err = store.delete_student("99").unwrap_err();
    assert!(matches!(err, RecordError::NotFound(99)));
    assert_eq!(row_count(&store, "students"), 1);
    assert_eq!(row_count(&store, "enrollments"), 1);
}

#[test]
fn delete_rejects_non_numeric_uid() {
    let (_dir, store) = store();
    let err = store.delete_student("abc").unwrap_err();
    assert_eq!(err.invalid_fields(), &[Field::Uid]);
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[test]
fn students_list_includes_unenrolled_but_join_does_not() {
    let (_dir, store) = store();
    store.add_student(&input("1", "Data Science")).unwrap();
    store.add_student(&input("2", "Nothing")).unwrap();
    store.add_student(&input("3", "Python Programming")).unwrap();

    assert_eq!(store.list_students().unwrap().len(), 3);
    let enrolled: Vec<i64> = store
        .list_enrollments()
        .unwrap()
        .iter()
        .map(|e| e.uid)
        .collect();
    assert_eq!(enrolled, vec![1, 3]);
}
