use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Course, Field, Student, StudentInput};

/// Internal representation of the student form. Text fields hold exactly what
/// was typed; the course is an index into the course list the app loaded.
#[derive(Default, Clone)]
pub(crate) struct StudentForm {
    pub(crate) uid: String,
    pub(crate) name: String,
    pub(crate) contact: String,
    pub(crate) email: String,
    pub(crate) age: String,
    pub(crate) course: Option<usize>,
    pub(crate) active: StudentField,
    pub(crate) error: Option<String>,
    /// Fields the last store call rejected; drawn in red until edited.
    pub(crate) invalid: Vec<Field>,
}

/// Fields available within the student form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum StudentField {
    #[default]
    Uid,
    Name,
    Contact,
    Email,
    Age,
    Course,
}

impl StudentField {
    pub(crate) const ALL: [StudentField; 6] = [
        StudentField::Uid,
        StudentField::Name,
        StudentField::Contact,
        StudentField::Email,
        StudentField::Age,
        StudentField::Course,
    ];

    pub(crate) fn label(self) -> &'static str {
        self.as_field().label()
    }

    pub(crate) fn as_field(self) -> Field {
        match self {
            StudentField::Uid => Field::Uid,
            StudentField::Name => Field::Name,
            StudentField::Contact => Field::Contact,
            StudentField::Email => Field::Email,
            StudentField::Age => Field::Age,
            StudentField::Course => Field::Course,
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or_default()
    }
}

impl StudentForm {
    /// Populate the form from a stored student, preselecting their course when
    /// one is known.
    pub(crate) fn from_student(student: &Student, course: Option<usize>) -> Self {
        Self {
            uid: student.uid.to_string(),
            name: student.name.clone(),
            contact: student.contact.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
            course,
            active: StudentField::Name,
            error: None,
            invalid: Vec::new(),
        }
    }

    pub(crate) fn next_field(&mut self) {
        let next = (self.active.index() + 1) % StudentField::ALL.len();
        self.active = StudentField::ALL[next];
    }

    pub(crate) fn previous_field(&mut self) {
        let len = StudentField::ALL.len();
        let previous = (self.active.index() + len - 1) % len;
        self.active = StudentField::ALL[previous];
    }

    fn text_mut(&mut self, field: StudentField) -> Option<&mut String> {
        match field {
            StudentField::Uid => Some(&mut self.uid),
            StudentField::Name => Some(&mut self.name),
            StudentField::Contact => Some(&mut self.contact),
            StudentField::Email => Some(&mut self.email),
            StudentField::Age => Some(&mut self.age),
            StudentField::Course => None,
        }
    }

    /// Append a character to the active text field. The course picker does not
    /// accept typed input.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        let pushed = match self.text_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        };
        if pushed {
            self.mark_edited();
        }
        pushed
    }

    pub(crate) fn backspace(&mut self) {
        match self.text_mut(self.active) {
            Some(value) => {
                value.pop();
            }
            None => self.course = None,
        }
        self.mark_edited();
    }

    /// Record a rejected submission so the offending fields stand out.
    pub(crate) fn reject(&mut self, message: String, invalid: &[Field]) {
        self.error = Some(message);
        self.invalid = invalid.to_vec();
    }

    fn mark_edited(&mut self) {
        let field = self.active.as_field();
        self.invalid.retain(|invalid| *invalid != field);
        self.error = None;
    }

    /// Step through the course list, wrapping at both ends. An empty selection
    /// moves to the first (or last) course.
    pub(crate) fn cycle_course(&mut self, offset: isize, course_count: usize) {
        if course_count == 0 {
            self.course = None;
            return;
        }
        let count = course_count as isize;
        self.course = Some(match self.course {
            Some(current) => (current as isize + offset).rem_euclid(count) as usize,
            None if offset < 0 => course_count - 1,
            None => 0,
        });
        self.mark_edited();
    }

    /// Hand the raw strings to the record store. The course name is empty when
    /// nothing is selected.
    pub(crate) fn to_input(&self, courses: &[Course]) -> StudentInput {
        StudentInput {
            uid: self.uid.clone(),
            name: self.name.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
            age: self.age.clone(),
            course_name: self
                .course
                .and_then(|index| courses.get(index))
                .map(|course| course.course_name.clone())
                .unwrap_or_default(),
        }
    }

    fn display_value(&self, field: StudentField, courses: &[Course]) -> String {
        match field {
            StudentField::Uid => self.uid.clone(),
            StudentField::Name => self.name.clone(),
            StudentField::Contact => self.contact.clone(),
            StudentField::Email => self.email.clone(),
            StudentField::Age => self.age.clone(),
            StudentField::Course => self
                .course
                .and_then(|index| courses.get(index))
                .map(|course| format!("< {} >", course.course_name))
                .unwrap_or_default(),
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field: StudentField, courses: &[Course]) -> Line<'static> {
        let value = self.display_value(field, courses);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            match field {
                StudentField::Course => "<select with ←/→>".to_string(),
                _ => "<required>".to_string(),
            }
        } else {
            value.clone()
        };

        let style = if self.invalid.contains(&field.as_field()) {
            Style::default().fg(Color::Red)
        } else if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{:>8}: ", field.label())),
            Span::styled(display, style),
        ])
    }

    /// Character count of a text field, used to place the cursor.
    pub(crate) fn value_len(&self, field: StudentField) -> usize {
        match field {
            StudentField::Uid => self.uid.chars().count(),
            StudentField::Name => self.name.chars().count(),
            StudentField::Contact => self.contact.chars().count(),
            StudentField::Email => self.email.chars().count(),
            StudentField::Age => self.age.chars().count(),
            StudentField::Course => 0,
        }
    }
}

/// Pending delete awaiting a yes/no answer.
#[derive(Clone)]
pub(crate) struct ConfirmStudentDelete {
    /// UID exactly as typed in the form.
    pub(crate) uid: String,
    /// Name of the matching student, when the UID is in the table.
    pub(crate) name: Option<String>,
}
