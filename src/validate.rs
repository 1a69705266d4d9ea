//! Field validators. Each predicate is pure and looks only at the string it is
//! handed; the `check_*` helpers combine them for the add and update flows and
//! turn a passing form into a typed [`Student`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{RecordError, Result};
use crate::models::{Field, Student, StudentInput};

pub const MIN_AGE: i64 = 10;
pub const MAX_AGE: i64 = 100;

static CONTACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("contact pattern compiles"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+@[\w.-]+\.\w+$").expect("email pattern compiles"));

/// Parse an integer the way a form field is typed: surrounding whitespace is
/// ignored, everything else must be a plain signed integer.
fn parse_integer(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Any integer, optionally surrounded by whitespace.
pub fn validate_uid(value: &str) -> bool {
    parse_integer(value).is_some()
}

/// Anything that is not blank once trimmed.
pub fn validate_name(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Exactly ten digits, nothing before or after.
pub fn validate_contact(value: &str) -> bool {
    CONTACT_RE.is_match(value)
}

/// Syntactic `local@domain.tld` check. Deliverability is not our concern.
pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// An integer between `MIN_AGE` and `MAX_AGE`, inclusive.
pub fn validate_age(value: &str) -> bool {
    parse_integer(value).is_some_and(|age| (MIN_AGE..=MAX_AGE).contains(&age))
}

/// Validate a form for the add flow: every field including a course choice.
pub fn check_for_add(input: &StudentInput) -> Result<Student> {
    let mut invalid = invalid_student_fields(input);
    if input.course_name.trim().is_empty() {
        invalid.push(Field::Course);
    }
    into_student(input, invalid)
}

/// Validate a form for the update flow. The course may be left blank, in which
/// case the enrollment is not touched.
pub fn check_for_update(input: &StudentInput) -> Result<Student> {
    let invalid = invalid_student_fields(input);
    into_student(input, invalid)
}

/// Parse a bare UID, as used by the delete flow.
pub fn parse_uid(value: &str) -> Result<i64> {
    parse_integer(value).ok_or_else(|| RecordError::Validation(vec![Field::Uid]))
}

fn invalid_student_fields(input: &StudentInput) -> Vec<Field> {
    let checks: [(Field, bool); 5] = [
        (Field::Uid, validate_uid(&input.uid)),
        (Field::Name, validate_name(&input.name)),
        (Field::Contact, validate_contact(&input.contact)),
        (Field::Email, validate_email(&input.email)),
        (Field::Age, validate_age(&input.age)),
    ];
    checks
        .into_iter()
        .filter_map(|(field, ok)| (!ok).then_some(field))
        .collect()
}

fn into_student(input: &StudentInput, invalid: Vec<Field>) -> Result<Student> {
    match (parse_integer(&input.uid), parse_integer(&input.age)) {
        (Some(uid), Some(age)) if invalid.is_empty() => Ok(Student {
            uid,
            name: input.name.trim().to_string(),
            contact: input.contact.clone(),
            email: input.email.clone(),
            age,
        }),
        _ => Err(RecordError::Validation(invalid)),
    }
}
