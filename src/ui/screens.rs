use crate::models::{EnrollmentRow, Student};

/// The two views the application switches between.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Tab {
    Students,
    Enrollments,
}

impl Tab {
    pub(crate) fn toggle(self) -> Self {
        match self {
            Tab::Students => Tab::Enrollments,
            Tab::Enrollments => Tab::Students,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Tab::Students => 0,
            Tab::Enrollments => 1,
        }
    }
}

/// Rows shown in a table plus the highlighted row.
pub(crate) struct TableScreen<T> {
    pub(crate) rows: Vec<T>,
    pub(crate) selected: usize,
}

impl<T> TableScreen<T> {
    pub(crate) fn new(rows: Vec<T>) -> Self {
        Self { rows, selected: 0 }
    }

    /// Swap in freshly loaded rows, keeping the highlight in bounds.
    pub(crate) fn replace_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.ensure_in_bounds();
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.rows.len() - 1;
        self.selected = self.selected.saturating_add_signed(offset).min(last);
    }

    pub(crate) fn current(&self) -> Option<&T> {
        self.rows.get(self.selected)
    }

    fn ensure_in_bounds(&mut self) {
        if self.rows.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }
    }
}

pub(crate) type StudentScreen = TableScreen<Student>;
pub(crate) type EnrollmentScreen = TableScreen<EnrollmentRow>;

impl StudentScreen {
    /// Move the highlight onto the student with `uid`, if listed.
    pub(crate) fn focus_uid(&mut self, uid: i64) {
        if let Some(index) = self.rows.iter().position(|student| student.uid == uid) {
            self.selected = index;
        }
    }

    pub(crate) fn find(&self, uid: i64) -> Option<&Student> {
        self.rows.iter().find(|student| student.uid == uid)
    }
}

impl EnrollmentScreen {
    pub(crate) fn course_of(&self, uid: i64) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.uid == uid)
            .map(|row| row.course_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(uid: i64) -> Student {
        Student {
            uid,
            name: format!("S{uid}"),
            contact: "0000000000".to_string(),
            email: "s@x.io".to_string(),
            age: 20,
        }
    }

    #[test]
    fn selection_is_clamped() {
        let mut screen = StudentScreen::new(vec![student(1), student(2), student(3)]);
        screen.move_selection(-5);
        assert_eq!(screen.selected, 0);
        screen.move_selection(10);
        assert_eq!(screen.selected, 2);

        screen.replace_rows(vec![student(1)]);
        assert_eq!(screen.selected, 0);
        screen.replace_rows(Vec::new());
        assert!(screen.current().is_none());
    }

    #[test]
    fn focus_uid_moves_highlight() {
        let mut screen = StudentScreen::new(vec![student(4), student(8)]);
        screen.focus_uid(8);
        assert_eq!(screen.current().map(|s| s.uid), Some(8));
        screen.focus_uid(99);
        assert_eq!(screen.current().map(|s| s.uid), Some(8));
    }

    #[test]
    fn tabs_toggle() {
        assert_eq!(Tab::Students.toggle(), Tab::Enrollments);
        assert_eq!(Tab::Enrollments.toggle().index(), 0);
    }
}
