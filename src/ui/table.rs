//! Employee table pane.
//!
//! Rows are drawn from the roster starting at the app's scroll offset.  The
//! delete control is always the right-most column, which keeps mouse
//! hit-testing a matter of arithmetic on the pane's inner area.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Cell, Row, Table, Widget},
};

use crate::core::roster::{DeleteControl, Roster};
use crate::ui::theme::Theme;

const HEADERS: [&str; 6] = ["First Name", "Last Name", "ID", "Title", "Salary", ""];
const DELETE_WIDTH: u16 = DeleteControl::LABEL.len() as u16;
/// Header row height inside the border.
const HEADER_HEIGHT: u16 = 1;

pub struct EmployeeTable<'a> {
    pub roster: &'a Roster,
    pub selected: usize,
    pub offset: usize,
    pub has_focus: bool,
}

/// What a click inside the table pane landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableHit {
    /// A row's data cells.
    Row(usize),
    /// A row's `[Delete]` cell.
    Delete(usize),
}

impl<'a> EmployeeTable<'a> {
    fn block(&self) -> Block<'static> {
        let border = if self.has_focus {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        };
        Block::default()
            .title(format!(" Employees ({}) ", self.roster.len()))
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
    }
}

impl<'a> Widget for EmployeeTable<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();

        let header = Row::new(HEADERS.map(Cell::from)).style(Theme::header_style());

        let placeholder_area = if self.roster.is_empty() {
            let inner = block.inner(area);
            inner.height.checked_sub(HEADER_HEIGHT + 1).map(|_| {
                Rect::new(inner.x, inner.y + HEADER_HEIGHT, inner.width, 1)
            })
        } else {
            None
        };

        let rows: Vec<Row> = self
            .roster
            .rows()
            .iter()
            .enumerate()
            .skip(self.offset)
            .map(|(i, row)| {
                let [first, last, id, title, salary] = row.cells();
                let style = if self.has_focus && i == self.selected {
                    Theme::selected_style()
                } else {
                    Theme::row_style()
                };
                Row::new([
                    Cell::from(first),
                    Cell::from(last),
                    Cell::from(id),
                    Cell::from(title),
                    Cell::from(Line::styled(salary, Theme::salary_style()).right_aligned()),
                    Cell::from(Line::styled(DeleteControl::LABEL, Theme::delete_style())),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Fill(3),
            Constraint::Fill(3),
            Constraint::Fill(1),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(DELETE_WIDTH),
        ];

        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(block)
            .render(area, buf);

        if let Some(placeholder) = placeholder_area {
            Line::styled(" No employees yet", Theme::placeholder_style()).render(placeholder, buf);
        }
    }
}

/// Number of data rows that fit in a table pane of `area`.
pub fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2 + HEADER_HEIGHT) as usize
}

/// Map a click at `(col, row)` to the table row it hits.
pub fn hit_test(
    area: Rect,
    offset: usize,
    row_count: usize,
    col: u16,
    row: u16,
) -> Option<TableHit> {
    let inner = Rect::new(
        area.x.saturating_add(1),
        area.y.saturating_add(1),
        area.width.saturating_sub(2),
        area.height.saturating_sub(2),
    );
    let first_data_row = inner.y + HEADER_HEIGHT;
    if col < inner.x || col >= inner.right() || row < first_data_row || row >= inner.bottom() {
        return None;
    }

    let index = offset + (row - first_data_row) as usize;
    if index >= row_count {
        return None;
    }

    let delete_start = inner.right().saturating_sub(DELETE_WIDTH);
    if col >= delete_start {
        Some(TableHit::Delete(index))
    } else {
        Some(TableHit::Row(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::employee::Employee;
    use crate::ui::buffer_lines;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.insert(Employee {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            id: "1".into(),
            title: "Engineer".into(),
            salary: dec!(240000),
        });
        roster.insert(Employee {
            first_name: "John".into(),
            last_name: "Roe".into(),
            id: "2".into(),
            title: "Intern".into(),
            salary: dec!(12),
        });
        roster
    }

    #[test]
    fn renders_rows_with_formatted_salary_and_delete_control() {
        let roster = roster();
        let area = Rect::new(0, 0, 70, 6);
        let mut buf = Buffer::empty(area);
        EmployeeTable {
            roster: &roster,
            selected: 0,
            offset: 0,
            has_focus: true,
        }
        .render(area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[0].contains("Employees (2)"), "{lines:?}");
        assert!(lines[1].contains("First Name"), "{lines:?}");
        assert!(lines[2].contains("Jane"), "{lines:?}");
        assert!(lines[2].contains("$240,000"), "{lines:?}");
        assert!(lines[2].trim_end_matches('│').ends_with("[Delete]"), "{lines:?}");
        assert!(lines[3].contains("John"), "{lines:?}");
        assert!(lines[3].contains("$12"), "{lines:?}");
    }

    #[test]
    fn empty_roster_shows_placeholder() {
        let roster = Roster::new();
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        EmployeeTable {
            roster: &roster,
            selected: 0,
            offset: 0,
            has_focus: false,
        }
        .render(area, &mut buf);
        assert!(buffer_lines(&buf)[2].contains("No employees yet"));
    }

    #[test]
    fn offset_skips_leading_rows() {
        let roster = roster();
        let area = Rect::new(0, 0, 70, 6);
        let mut buf = Buffer::empty(area);
        EmployeeTable {
            roster: &roster,
            selected: 1,
            offset: 1,
            has_focus: true,
        }
        .render(area, &mut buf);
        let lines = buffer_lines(&buf);
        assert!(lines[2].contains("John"), "{lines:?}");
        assert!(!lines.iter().any(|l| l.contains("Jane")), "{lines:?}");
    }

    #[test]
    fn hit_test_distinguishes_delete_cell() {
        let area = Rect::new(10, 0, 60, 10);
        // Inner spans x 11..69; delete cell is the last 8 columns.
        assert_eq!(hit_test(area, 0, 2, 65, 2), Some(TableHit::Delete(0)));
        assert_eq!(hit_test(area, 0, 2, 61, 3), Some(TableHit::Delete(1)));
        assert_eq!(hit_test(area, 0, 2, 20, 2), Some(TableHit::Row(0)));
        // Header, border and rows past the end are misses.
        assert_eq!(hit_test(area, 0, 2, 65, 1), None);
        assert_eq!(hit_test(area, 0, 2, 69, 2), None);
        assert_eq!(hit_test(area, 0, 2, 65, 4), None);
        // Scrolled tables offset the index.
        assert_eq!(hit_test(area, 3, 5, 65, 2), Some(TableHit::Delete(3)));
    }

    #[test]
    fn visible_rows_excludes_border_and_header() {
        assert_eq!(visible_rows(Rect::new(0, 0, 50, 10)), 7);
        assert_eq!(visible_rows(Rect::new(0, 0, 50, 2)), 0);
    }
}
