use std::mem;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap,
};
use ratatui::Frame;

use crate::error::RecordError;
use crate::models::{Course, EnrollmentRow, Student};
use crate::store::RecordStore;
use crate::validate::parse_uid;

use super::forms::{ConfirmStudentDelete, StudentField, StudentForm};
use super::helpers::{centered_rect, format_fee, surface_error};
use super::screens::{EnrollmentScreen, StudentScreen, Tab};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Height of the tab bar at the top of the window.
const TABS_HEIGHT: u16 = 3;
/// Six field lines, a spacer and the hint/error line, plus borders.
const FORM_HEIGHT: u16 = 10;
/// Width of the right-aligned `Label: ` prefix drawn before each form value.
const FIELD_PREFIX_WIDTH: u16 = 10;
/// How far PageUp/PageDown move the table highlight.
const PAGE_STEP: isize = 5;

/// Modal state layered over the current tab.
enum Mode {
    Normal,
    ConfirmDelete(ConfirmStudentDelete),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state. The store is stateless; everything the screen
/// shows lives here and is reloaded from the store after each change.
pub struct App {
    store: RecordStore,
    courses: Vec<Course>,
    students: StudentScreen,
    enrollments: EnrollmentScreen,
    form: StudentForm,
    tab: Tab,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(
        store: RecordStore,
        courses: Vec<Course>,
        students: Vec<Student>,
        enrollments: Vec<EnrollmentRow>,
    ) -> Self {
        Self {
            store,
            courses,
            students: StudentScreen::new(students),
            enrollments: EnrollmentScreen::new(enrollments),
            form: StudentForm::default(),
            tab: Tab::Students,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Handle a plain key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::ConfirmDelete(confirm) => self.handle_confirm_delete(code, confirm),
        };

        exit
    }

    /// Handle a `Ctrl+<ch>` shortcut. Returns `true` when the user asked to
    /// quit.
    pub fn handle_ctrl(&mut self, ch: char) -> bool {
        if !matches!(self.mode, Mode::Normal) {
            return false;
        }

        match ch {
            'c' => return true,
            't' => {
                self.tab = self.tab.toggle();
                self.clear_status();
            }
            'a' => self.add_student(),
            'u' => self.update_student(),
            'd' => self.request_delete(),
            'l' => {
                self.form = StudentForm::default();
                self.set_status("Form cleared.", StatusKind::Info);
            }
            'e' => self.load_selected(),
            _ => {}
        }
        false
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Esc => *exit = true,
            KeyCode::PageUp => self.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.move_selection(PAGE_STEP),
            _ => match self.tab {
                Tab::Students => self.handle_form_key(code),
                Tab::Enrollments => match code {
                    KeyCode::Up => self.move_selection(-1),
                    KeyCode::Down => self.move_selection(1),
                    _ => {}
                },
            },
        }
        Mode::Normal
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.previous_field(),
            KeyCode::Left if self.form.active == StudentField::Course => {
                self.form.cycle_course(-1, self.courses.len())
            }
            KeyCode::Right if self.form.active == StudentField::Course => {
                self.form.cycle_course(1, self.courses.len())
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(ch) => {
                self.form.push_char(ch);
            }
            _ => {}
        }
    }

    fn handle_confirm_delete(&mut self, code: KeyCode, confirm: ConfirmStudentDelete) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.perform_delete(&confirm);
                Mode::Normal
            }
            _ => Mode::ConfirmDelete(confirm),
        }
    }

    fn add_student(&mut self) {
        let input = self.form.to_input(&self.courses);
        match self.store.add_student(&input) {
            Ok(course) => {
                let uid = parse_uid(&input.uid).ok();
                self.form = StudentForm::default();
                let message = match course {
                    Some(course) => format!("Student added and enrolled in {course}."),
                    None => format!(
                        "Student added without enrollment: course \"{}\" not found.",
                        input.course_name
                    ),
                };
                self.set_status(message, StatusKind::Info);
                self.refresh(uid);
            }
            Err(err) => self.reject(&err),
        }
    }

    fn update_student(&mut self) {
        let input = self.form.to_input(&self.courses);
        match self.store.update_student(&input) {
            Ok(course) => {
                let uid = parse_uid(&input.uid).ok();
                self.form = StudentForm::default();
                let message = match course {
                    Some(course) => format!("Student updated; now enrolled in {course}."),
                    None => "Student updated successfully.".to_string(),
                };
                self.set_status(message, StatusKind::Info);
                self.refresh(uid);
            }
            Err(err) => {
                self.reject(&err);
                // The table may be stale if another edit removed the row.
                if matches!(err, RecordError::NotFound(_)) {
                    self.refresh(None);
                }
            }
        }
    }

    fn request_delete(&mut self) {
        match parse_uid(&self.form.uid) {
            Ok(uid) => {
                let name = self.students.find(uid).map(|student| student.name.clone());
                self.mode = Mode::ConfirmDelete(ConfirmStudentDelete {
                    uid: self.form.uid.clone(),
                    name,
                });
            }
            Err(err) => self.reject(&err),
        }
    }

    fn perform_delete(&mut self, confirm: &ConfirmStudentDelete) {
        match self.store.delete_student(&confirm.uid) {
            Ok(()) => {
                self.form = StudentForm::default();
                self.set_status("Student deleted successfully.", StatusKind::Info);
                self.refresh(None);
            }
            Err(err) => self.reject(&err),
        }
    }

    /// Copy the highlighted row of the current tab into the form so it can be
    /// updated or deleted.
    fn load_selected(&mut self) {
        let uid = match self.tab {
            Tab::Students => self.students.current().map(|student| student.uid),
            Tab::Enrollments => self.enrollments.current().map(|row| row.uid),
        };
        let Some(student) = uid.and_then(|uid| self.students.find(uid)).cloned() else {
            self.set_status("No student selected.", StatusKind::Error);
            return;
        };

        let course = self
            .enrollments
            .course_of(student.uid)
            .and_then(|name| self.courses.iter().position(|c| c.course_name == name));
        self.form = StudentForm::from_student(&student, course);
        self.tab = Tab::Students;
        self.set_status(
            format!("Loaded student {} into the form.", student.uid),
            StatusKind::Info,
        );
    }

    /// Reload both tables from the store, optionally highlighting a student.
    /// A failed reload keeps the rows already on screen and replaces the
    /// status with the error; whatever was just saved stays saved.
    fn refresh(&mut self, focus_uid: Option<i64>) {
        let rows = self
            .store
            .list_students()
            .and_then(|students| Ok((students, self.store.list_enrollments()?)));
        match rows {
            Ok((students, enrollments)) => {
                self.students.replace_rows(students);
                self.enrollments.replace_rows(enrollments);
                if let Some(uid) = focus_uid {
                    self.students.focus_uid(uid);
                }
            }
            Err(err) => self.set_status(
                format!("Saved, but the tables could not be reloaded: {}", surface_error(&err)),
                StatusKind::Error,
            ),
        }
    }

    fn reject(&mut self, err: &RecordError) {
        let message = surface_error(err);
        self.form.reject(message.clone(), err.invalid_fields());
        self.set_status(message, StatusKind::Error);
    }

    fn move_selection(&mut self, offset: isize) {
        match self.tab {
            Tab::Students => self.students.move_selection(offset),
            Tab::Enrollments => self.enrollments.move_selection(offset),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TABS_HEIGHT.min(area.height)),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_tabs(frame, chunks[0]);
        match self.tab {
            Tab::Students => self.draw_students_tab(frame, chunks[1]),
            Tab::Enrollments => self.draw_enrollments_table(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);

        if let Mode::ConfirmDelete(confirm) = &self.mode {
            self.draw_confirm_delete(frame, area, confirm);
        }
    }

    fn draw_tabs(&self, frame: &mut Frame, area: Rect) {
        let tabs = Tabs::new(vec!["Students", "Enrollments"])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Student Management"),
            )
            .select(self.tab.index())
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_students_tab(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(0)])
            .split(area);
        self.draw_form(frame, chunks[0]);
        self.draw_students_table(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Student Information")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let mut lines: Vec<Line> = StudentField::ALL
            .iter()
            .map(|field| self.form.build_line(*field, &self.courses))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &self.form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Tab to move between fields • ←/→ to pick a course",
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines), inner);

        if matches!(self.mode, Mode::Normal) && self.form.active != StudentField::Course {
            let row = StudentField::ALL
                .iter()
                .position(|field| *field == self.form.active)
                .unwrap_or_default() as u16;
            let typed = self.form.value_len(self.form.active) as u16;
            let cursor_x = inner.x + FIELD_PREFIX_WIDTH + typed;
            if row < inner.height && cursor_x < inner.right() {
                frame.set_cursor_position((cursor_x, inner.y + row));
            }
        }
    }

    fn draw_students_table(&self, frame: &mut Frame, area: Rect) {
        let header = ["UID", "Name", "Contact", "Email", "Age"];
        let rows = self.students.rows.iter().map(|student| {
            Row::new(vec![
                Cell::from(student.uid.to_string()),
                Cell::from(student.name.clone()),
                Cell::from(student.contact.clone()),
                Cell::from(student.email.clone()),
                Cell::from(student.age.to_string()),
            ])
        });
        let widths = [
            Constraint::Length(8),
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Percentage(35),
            Constraint::Length(5),
        ];
        let title = format!("Students ({})", self.students.rows.len());
        self.render_table(frame, area, &title, &header, rows, &widths, self.students.selected);
    }

    fn draw_enrollments_table(&self, frame: &mut Frame, area: Rect) {
        let header = ["UID", "Name", "Course", "Duration", "Fee"];
        let rows = self.enrollments.rows.iter().map(|row| {
            Row::new(vec![
                Cell::from(row.uid.to_string()),
                Cell::from(row.name.clone()),
                Cell::from(row.course_name.clone()),
                Cell::from(row.duration.clone()),
                Cell::from(format_fee(row.fee)),
            ])
        });
        let widths = [
            Constraint::Length(8),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(8),
        ];
        let title = format!("Enrollments ({})", self.enrollments.rows.len());
        self.render_table(
            frame,
            area,
            &title,
            &header,
            rows,
            &widths,
            self.enrollments.selected,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn render_table<'a>(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        header: &[&'static str],
        rows: impl Iterator<Item = Row<'a>>,
        widths: &[Constraint],
        selected: usize,
    ) {
        let rows: Vec<Row> = rows.collect();
        if rows.is_empty() {
            let message = Paragraph::new("Nothing to show yet.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(title.to_string()));
            frame.render_widget(message, area);
            return;
        }

        let header = Row::new(header.iter().copied()).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let table = Table::new(rows, widths.iter().copied())
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .row_highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        match (&self.mode, self.tab) {
            (Mode::ConfirmDelete(_), _) => Line::from(vec![
                Span::styled("[Y]", key_style),
                Span::raw(" Delete   "),
                Span::styled("[N/Esc]", key_style),
                Span::raw(" Cancel"),
            ]),
            (Mode::Normal, Tab::Students) => Line::from(vec![
                Span::styled("[^A]", key_style),
                Span::raw(" Add  "),
                Span::styled("[^U]", key_style),
                Span::raw(" Update  "),
                Span::styled("[^D]", key_style),
                Span::raw(" Delete  "),
                Span::styled("[^L]", key_style),
                Span::raw(" Clear  "),
                Span::styled("[^E]", key_style),
                Span::raw(" Edit selected  "),
                Span::styled("[PgUp/PgDn]", key_style),
                Span::raw(" Scroll  "),
                Span::styled("[^T]", key_style),
                Span::raw(" Enrollments  "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Quit"),
            ]),
            (Mode::Normal, Tab::Enrollments) => Line::from(vec![
                Span::styled("[↑↓]", key_style),
                Span::raw(" Navigate  "),
                Span::styled("[^E]", key_style),
                Span::raw(" Edit student  "),
                Span::styled("[^T]", key_style),
                Span::raw(" Students  "),
                Span::styled("[Esc]", key_style),
                Span::raw(" Quit"),
            ]),
        }
    }

    fn draw_confirm_delete(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmStudentDelete) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title("Confirm Removal")
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let headline = match &confirm.name {
            Some(name) => format!("Delete student {} ({name})?", confirm.uid.trim()),
            None => format!("Delete student {}?", confirm.uid.trim()),
        };
        let lines = vec![
            Line::from(headline),
            Line::from("Their enrollment is removed as well."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}
