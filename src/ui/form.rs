//! Entry form pane.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::app::form::{EmployeeForm, TextInput};
use crate::core::employee::Field;
use crate::ui::theme::Theme;

/// Label column width, including the `: ` separator.
const LABEL_WIDTH: u16 = 12;

pub struct FormWidget<'a> {
    pub form: &'a EmployeeForm,
    pub has_focus: bool,
    pub submit_hint: &'a str,
}

impl<'a> FormWidget<'a> {
    fn block(&self) -> Block<'static> {
        let border = if self.has_focus {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        };
        Block::default()
            .title(" New Employee ")
            .title_style(Theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
    }

    /// Where the terminal cursor belongs, if the form has focus.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        if !self.has_focus {
            return None;
        }
        let inner = self.block().inner(area);
        let width = inner.width.saturating_sub(LABEL_WIDTH);
        let row = Field::ALL
            .iter()
            .position(|f| *f == self.form.focused_field())? as u16;
        if width == 0 || row >= inner.height {
            return None;
        }
        let input = self.form.input(self.form.focused_field());
        let (start, _) = visible_window(input, width as usize);
        let x = inner.x + LABEL_WIDTH + (input.cursor - start) as u16;
        Some(Position::new(x, inner.y + row))
    }
}

impl<'a> Widget for FormWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let value_width = inner.width.saturating_sub(LABEL_WIDTH) as usize;
        let focused = self.form.focused_field();
        let error_field = self.form.error().map(|e| e.field());

        let mut lines = Vec::with_capacity(Field::ALL.len() + 3);
        for field in Field::ALL {
            let input = self.form.input(field);
            let (start, end) = visible_window(input, value_width);
            let shown: String = input.value.chars().skip(start).take(end - start).collect();

            let label_style = if error_field == Some(field) {
                Theme::error_style()
            } else {
                Theme::label_style()
            };
            let value_style = if self.has_focus && field == focused {
                Theme::focused_input_style()
            } else {
                Theme::input_style()
            };
            let label = format!("{:<width$}: ", field.label(), width = LABEL_WIDTH as usize - 2);
            lines.push(Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(shown, value_style),
            ]));
        }

        lines.push(Line::raw(""));
        match self.form.error() {
            Some(error) => lines.push(Line::from(Span::styled(
                format!(" {error}"),
                Theme::error_style(),
            ))),
            None => lines.push(Line::raw("")),
        }
        lines.push(Line::from(Span::styled(
            format!(" {}: add employee", self.submit_hint),
            Theme::dim_style(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Char range of `input` to show in `width` columns, keeping the cursor in
/// view.  The cursor may sit one past the last char.
fn visible_window(input: &TextInput, width: usize) -> (usize, usize) {
    let len = input.value.chars().count();
    if width == 0 {
        return (0, 0);
    }
    let start = input.cursor.saturating_sub(width - 1);
    let end = (start + width).min(len);
    (start, end.max(start))
}
