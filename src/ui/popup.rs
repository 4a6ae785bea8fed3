//! Popup overlay widgets for the budget warning and the help screen.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::config::{Action, AppConfig};

// ───────────────────────────────────────── budget warning ────

/// Interruptive over-budget dialog.
pub struct BudgetWarningPopup<'a> {
    pub message: &'a str,
    pub total: &'a str,
}

impl<'a> Widget for BudgetWarningPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (self.message.chars().count() as u16 + 6).max(36);
        let popup = centered_fixed(width, 9, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Over Budget ")
            .title_style(
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Red));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                self.message,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled("Current: ", Style::default().fg(Color::Gray)),
                Span::styled(self.total, Style::default().fg(Color::Red)),
            ]),
            Line::raw(""),
            Line::from(Span::styled(
                "Enter/Esc: OK",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}

// ───────────────────────────────────────── help popup ────────

/// Key binding reference, read from the live config.
pub struct HelpPopup<'a> {
    pub config: &'a AppConfig,
}

impl<'a> Widget for HelpPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // actions + 2 blanks + 1 mouse line + 1 hint + 2 border
        let height = (Action::ALL.len() as u16) + 6;
        let popup = centered_fixed(52, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Controls ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let dim = Style::default().fg(Color::DarkGray);
        let label_style = Style::default().fg(Color::White);
        let key_style = Style::default().fg(Color::Yellow);
        let mut lines = Vec::new();

        lines.push(Line::raw(""));

        for &action in Action::ALL {
            // Fixed-width columns: label left-aligned, keys right-aligned.
            let label_col = format!("   {:<22}", action.label());
            let inner_width = inner.width as usize;
            let keys_width = inner_width
                .saturating_sub(label_col.chars().count() + 1)
                .max(1);
            let keys_col = format!("{:>keys_width$}", self.config.display_bindings(action));

            lines.push(Line::from(vec![
                Span::styled(label_col, label_style),
                Span::styled(keys_col, key_style),
            ]));
        }

        if self.config.mouse {
            lines.push(Line::from(Span::styled(
                "   Click [Delete] to remove a row",
                dim,
            )));
        } else {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled("  Esc: close", dim)));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;

    #[test]
    fn warning_popup_shows_message_and_total() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        BudgetWarningPopup {
            message: "Warning: Total monthly salary is over $20,000.00",
            total: "$20,001.00",
        }
        .render(area, &mut buf);

        let text = buffer_lines(&buf).join("\n");
        assert!(text.contains("Over Budget"), "{text}");
        assert!(text.contains("Warning: Total monthly salary is over $20,000.00"), "{text}");
        assert!(text.contains("$20,001.00"), "{text}");
    }

    #[test]
    fn help_popup_lists_every_action() {
        let config = AppConfig::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        HelpPopup { config: &config }.render(area, &mut buf);

        let text = buffer_lines(&buf).join("\n");
        for &action in Action::ALL {
            assert!(text.contains(action.label()), "missing {action:?}\n{text}");
        }
        assert!(text.contains("Ctrl+q"), "{text}");
    }

    #[test]
    fn centered_fixed_clamps_to_area() {
        assert_eq!(
            centered_fixed(40, 10, Rect::new(0, 0, 20, 5)),
            Rect::new(0, 0, 20, 5)
        );
        assert_eq!(
            centered_fixed(10, 4, Rect::new(0, 0, 30, 10)),
            Rect::new(10, 3, 10, 4)
        );
    }
}
