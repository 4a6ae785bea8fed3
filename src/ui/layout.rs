//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the entry form pane.
const FORM_WIDTH: u16 = 40;

/// Primary screen layout: form and table side by side, the total below
/// them, and a status bar at the bottom.
pub struct AppLayout {
    pub form_area: Rect,
    pub table_area: Rect,
    pub total_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // form + table
                Constraint::Length(3), // total
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(20)])
            .split(rows[0]);

        Self {
            form_area: panes[0],
            table_area: panes[1],
            total_area: rows[1],
            status_area: rows[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_tile_the_screen() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.status_area, Rect::new(0, 29, 100, 1));
        assert_eq!(layout.total_area, Rect::new(0, 26, 100, 3));
        assert_eq!(layout.form_area, Rect::new(0, 0, FORM_WIDTH, 26));
        assert_eq!(layout.table_area, Rect::new(FORM_WIDTH, 0, 60, 26));
    }
}
