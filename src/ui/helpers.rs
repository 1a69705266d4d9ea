use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::error::RecordError;

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Turn a store error into the sentence shown in the footer.
pub(crate) fn surface_error(err: &RecordError) -> String {
    match err {
        RecordError::Validation(_) => {
            format!("{err}. Please check the highlighted fields.")
        }
        RecordError::DuplicateKey(uid) => format!("UID {uid} already exists."),
        RecordError::NotFound(uid) => format!("Student {uid} not found."),
        RecordError::StoreUnavailable { source, .. } => format!("{err}: {source}"),
        RecordError::DataDirectory { source, .. } => format!("{err}: {source}"),
        RecordError::Storage(_) => err.to_string(),
    }
}

/// Fees are whole amounts in the seeded catalog; keep cents only when present.
pub(crate) fn format_fee(fee: f64) -> String {
    if fee.fract() == 0.0 {
        format!("{fee:.0}")
    } else {
        format!("{fee:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    #[test]
    fn errors_read_like_sentences() {
        assert_eq!(
            surface_error(&RecordError::DuplicateKey(3)),
            "UID 3 already exists."
        );
        assert_eq!(
            surface_error(&RecordError::NotFound(4)),
            "Student 4 not found."
        );
        assert_eq!(
            surface_error(&RecordError::Validation(vec![Field::Email])),
            "invalid input: Email. Please check the highlighted fields."
        );
    }

    #[test]
    fn fee_formatting() {
        assert_eq!(format_fee(300.0), "300");
        assert_eq!(format_fee(12.5), "12.50");
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
        assert_eq!(popup.width, 60);
    }
}
