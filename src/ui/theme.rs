//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── table ──────────────────────────────────────────────────
    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn row_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn salary_style() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn delete_style() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn placeholder_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    // ── form ───────────────────────────────────────────────────
    pub fn label_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn input_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn focused_input_style() -> Style {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn error_style() -> Style {
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn focused_border_style() -> Style {
        Style::default().fg(Color::Cyan)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn total_style(over_budget: bool) -> Style {
        let color = if over_budget { Color::Red } else { Color::Green };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn dim_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
