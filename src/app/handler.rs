//! Input handling: maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::{Action, Scope};
use crate::core::employee::Field;
use crate::ui::layout::AppLayout;
use crate::ui::table::{self, TableHit};

use super::state::{ActiveView, AppState, PaneFocus};

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    // A status message lasts until the next key.
    state.status_message = None;

    match state.active_view {
        ActiveView::BudgetWarning(_) => handle_warning_key(state, key),
        ActiveView::Help => handle_help_key(state, key),
        ActiveView::Main => match state.pane_focus {
            PaneFocus::Form => handle_form_key(state, key),
            PaneFocus::Table => handle_table_key(state, key),
        },
    }
}

// ── Modal views ─────────────────────────────────────────────────

/// The warning swallows everything until acknowledged.
fn handle_warning_key(state: &mut AppState, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        state.active_view = ActiveView::Main;
    }
}

fn handle_help_key(state: &mut AppState, key: KeyEvent) {
    let is_help = state.config.match_key(Scope::Global, key) == Some(Action::Help);
    if is_help || matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
        state.active_view = ActiveView::Main;
    }
}

/// Actions that work in every pane.  Returns `true` if handled.
fn apply_global(state: &mut AppState, action: Action) -> bool {
    match action {
        Action::Quit => state.should_quit = true,
        Action::Help => state.active_view = ActiveView::Help,
        Action::SwitchPane => {
            state.toggle_pane();
            state.clamp_selection();
        }
        _ => return false,
    }
    true
}

// ── Form pane ───────────────────────────────────────────────────

fn handle_form_key(state: &mut AppState, key: KeyEvent) {
    if let Some(action) = state.config.match_key(Scope::Form, key) {
        if apply_global(state, action) {
            return;
        }
        match action {
            Action::NextField => state.form.focus_next(),
            Action::PrevField => state.form.focus_prev(),
            Action::Submit => {
                if state.submit_form().is_ok() {
                    // Keep the new row in view.
                    state.selected_row = state.roster.len().saturating_sub(1);
                }
            }
            Action::ClearForm => state.form.reset(),
            _ => {}
        }
        return;
    }

    // Plain text editing.
    let typing = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    let input = state.form.focused_input_mut();
    match key.code {
        KeyCode::Char(c) if typing => input.insert_char(c),
        KeyCode::Backspace => input.delete_char(),
        KeyCode::Delete => input.delete_char_forward(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }
}

// ── Table pane ──────────────────────────────────────────────────

fn handle_table_key(state: &mut AppState, key: KeyEvent) {
    let Some(action) = state.config.match_key(Scope::Table, key) else {
        return;
    };
    if apply_global(state, action) {
        return;
    }
    match action {
        Action::MoveUp => state.select_prev(),
        Action::MoveDown => state.select_next(),
        Action::FirstRow => state.selected_row = 0,
        Action::LastRow => state.selected_row = state.roster.len().saturating_sub(1),
        Action::DeleteRow => {
            state.delete_selected();
        }
        _ => {}
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  `screen` is the full terminal area the layout
/// was computed from.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, screen: Rect) {
    if state.active_view != ActiveView::Main {
        return;
    }
    let layout = AppLayout::from_area(screen);
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(layout.table_area, col, row) {
                state.pane_focus = PaneFocus::Table;
                let hit = table::hit_test(
                    layout.table_area,
                    state.table_offset,
                    state.roster.len(),
                    col,
                    row,
                );
                match hit {
                    Some(TableHit::Delete(index)) => {
                        if let Some(control) = state.roster.get(index).map(|r| r.delete) {
                            state.delete_row(control.row);
                        }
                    }
                    Some(TableHit::Row(index)) => state.selected_row = index,
                    None => {}
                }
            } else if point_in_rect(layout.form_area, col, row) {
                state.pane_focus = PaneFocus::Form;
                // Field rows start just inside the border.
                let offset = row.saturating_sub(layout.form_area.y + 1) as usize;
                if row > layout.form_area.y {
                    if let Some(&field) = Field::ALL.get(offset) {
                        state.form.focus(field);
                    }
                }
            }
        }
        MouseEventKind::ScrollUp if point_in_rect(layout.table_area, col, row) => {
            state.select_prev();
        }
        MouseEventKind::ScrollDown if point_in_rect(layout.table_area, col, row) => {
            state.select_next();
        }
        _ => {}
    }
}

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x && col < area.right() && row >= area.y && row < area.bottom()
}
