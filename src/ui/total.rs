//! Monthly total bar.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::core::currency::format_cents;
use crate::core::payroll::MonthlyTotal;
use crate::ui::theme::Theme;
use rust_decimal::Decimal;

pub struct TotalBar<'a> {
    pub total: &'a MonthlyTotal,
    pub budget: Decimal,
}

impl<'a> Widget for TotalBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        let inner = block.inner(area);
        block.render(area, buf);

        let left = Line::from(vec![
            Span::styled(" Total Monthly: ", Theme::label_style()),
            Span::styled(self.total.display(), Theme::total_style(self.total.over_budget)),
        ]);
        Paragraph::new(left).render(inner, buf);

        let right = Line::from(Span::styled(
            format!("Budget {} / month ", format_cents(self.budget)),
            Theme::dim_style(),
        ));
        Paragraph::new(right)
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use rust_decimal_macros::dec;

    #[test]
    fn shows_total_and_budget() {
        let total = MonthlyTotal::from_salaries([dec!(240012)], dec!(20000));
        let area = Rect::new(0, 0, 70, 3);
        let mut buf = Buffer::empty(area);
        TotalBar {
            total: &total,
            budget: dec!(20000),
        }
        .render(area, &mut buf);

        let line = &buffer_lines(&buf)[1];
        assert!(line.contains("Total Monthly: $20,001.00"), "{line}");
        assert!(line.contains("Budget $20,000.00 / month"), "{line}");
    }
}
