//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use chrono::Local;

use crate::config::{AppConfig, Scope};
use crate::core::employee::{Employee, FormError};
use crate::core::payroll::{budget_warning, MonthlyTotal};
use crate::core::roster::{DeleteControl, Roster, RowId};

use super::form::EmployeeForm;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Main,
    /// Interruptive over-budget dialog.  Must be dismissed before anything
    /// else accepts input.
    BudgetWarning(String),
    Help,
}

/// Which pane receives key input in the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneFocus {
    #[default]
    Form,
    Table,
}

impl PaneFocus {
    pub fn scope(self) -> Scope {
        match self {
            PaneFocus::Form => Scope::Form,
            PaneFocus::Table => Scope::Table,
        }
    }
}

/// Top-level application state.
pub struct AppState {
    /// The employee table: single source of truth for the total.
    pub roster: Roster,
    /// The entry form.
    pub form: EmployeeForm,
    /// Last computed total.  Replaced wholesale on every refresh.
    pub total: MonthlyTotal,
    /// Highlighted table row.
    pub selected_row: usize,
    /// First visible table row.
    pub table_offset: usize,
    pub pane_focus: PaneFocus,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// User configuration.
    pub config: AppConfig,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Controls the main event loop.
    pub should_quit: bool,
}

impl AppState {
    /// Build the state and compute the initial (empty) total.
    pub fn new(config: AppConfig) -> Self {
        let mut state = Self {
            roster: Roster::new(),
            form: EmployeeForm::new(),
            total: MonthlyTotal::default(),
            selected_row: 0,
            table_offset: 0,
            pane_focus: PaneFocus::default(),
            active_view: ActiveView::default(),
            config,
            status_message: None,
            should_quit: false,
        };
        state.refresh_total();
        state
    }

    /// Recompute the monthly total from the roster and raise the warning
    /// dialog if it is over budget.
    pub fn refresh_total(&mut self) {
        let budget = self.config.monthly_budget;
        self.total = MonthlyTotal::compute(&self.roster, budget);
        tracing::debug!(
            rows = self.roster.len(),
            annual = %self.total.annual,
            monthly = %self.total.display(),
            "total refreshed"
        );

        if self.total.over_budget {
            tracing::warn!(
                monthly = %self.total.display(),
                budget = %budget,
                "Hello, IT. Have you tried turning it off and on again?"
            );
            self.active_view = ActiveView::BudgetWarning(budget_warning(budget));
        }
    }

    /// Submit the form: insert the employee and refresh the total.
    pub fn submit_form(&mut self) -> Result<RowId, FormError> {
        let employee = match self.form.submit() {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(field = e.field().name(), error = %e, "submission rejected");
                self.status_message = Some(e.to_string());
                return Err(e);
            }
        };
        Ok(self.add_employee(employee))
    }

    pub fn add_employee(&mut self, employee: Employee) -> RowId {
        let name = employee.full_name();
        let row = self.roster.insert(employee);
        tracing::info!(?row, %name, "employee added");
        self.status_message = Some(stamp(&format!("Added {name}")));
        self.refresh_total();
        row
    }

    /// Remove the row a delete control targets and refresh the total.
    pub fn delete_row(&mut self, row: RowId) -> Option<Employee> {
        let removed = DeleteControl { row }.activate(&mut self.roster)?;
        tracing::info!(?row, name = %removed.full_name(), "employee deleted");
        self.status_message = Some(stamp(&format!("Deleted {}", removed.full_name())));
        self.clamp_selection();
        self.refresh_total();
        Some(removed)
    }

    /// Activate the delete control of the highlighted row.
    pub fn delete_selected(&mut self) -> Option<Employee> {
        let control = self.roster.get(self.selected_row)?.delete;
        self.delete_row(control.row)
    }

    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected_row + 1 < self.roster.len() {
            self.selected_row += 1;
        }
    }

    /// Keep the selection on an existing row after the table shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.roster.len();
        if self.selected_row >= len {
            self.selected_row = len.saturating_sub(1);
        }
        if self.table_offset > self.selected_row {
            self.table_offset = self.selected_row;
        }
    }

    /// Adjust `table_offset` so the selection is visible in `height` rows.
    pub fn scroll_to_selection(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected_row < self.table_offset {
            self.table_offset = self.selected_row;
        } else if self.selected_row >= self.table_offset + height {
            self.table_offset = self.selected_row + 1 - height;
        }
    }

    pub fn toggle_pane(&mut self) {
        self.pane_focus = match self.pane_focus {
            PaneFocus::Form => PaneFocus::Table,
            PaneFocus::Table => PaneFocus::Form,
        };
    }
}

fn stamp(msg: &str) -> String {
    format!("[{}] {msg}", Local::now().format("%H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::employee::Field;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn submit(state: &mut AppState, first: &str, salary: &str) -> Result<RowId, FormError> {
        state.form.set(Field::FirstName, first);
        state.form.set(Field::LastName, "Doe");
        state.form.set(Field::Id, "1");
        state.form.set(Field::Title, "Engineer");
        state.form.set(Field::Salary, salary);
        state.submit_form()
    }

    fn dismiss(state: &mut AppState) {
        state.active_view = ActiveView::Main;
    }

    #[test]
    fn starts_at_zero_without_warning() {
        let state = AppState::new(AppConfig::default());
        assert_eq!(state.total.display(), "$0.00");
        assert_eq!(state.active_view, ActiveView::Main);
    }

    #[test]
    fn jane_doe_scenario() {
        let mut state = AppState::new(AppConfig::default());

        let jane = submit(&mut state, "Jane", "240000").unwrap();
        assert_eq!(state.roster.rows()[0].cells()[4], "$240,000");
        assert_eq!(state.total.display(), "$20,000.00");
        assert_eq!(state.active_view, ActiveView::Main);

        submit(&mut state, "John", "12").unwrap();
        assert_eq!(state.total.display(), "$20,001.00");
        assert_eq!(
            state.active_view,
            ActiveView::BudgetWarning("Warning: Total monthly salary is over $20,000.00".into())
        );
        dismiss(&mut state);

        state.delete_row(jane).unwrap();
        assert_eq!(state.total.display(), "$1.00");
        assert_eq!(state.active_view, ActiveView::Main);
    }

    #[test]
    fn warning_refires_after_delete_that_stays_over_budget() {
        let mut state = AppState::new(AppConfig::default());
        submit(&mut state, "A", "300000").unwrap();
        dismiss(&mut state);
        let b = submit(&mut state, "B", "1000").unwrap();
        dismiss(&mut state);

        state.delete_row(b);
        assert!(matches!(state.active_view, ActiveView::BudgetWarning(_)));
    }

    #[test]
    fn total_tracks_inserts_and_deletes() {
        let mut state = AppState::new(AppConfig::default());
        let salaries = [dec!(36000), dec!(48000), dec!(1200), dec!(5)];
        let mut ids = Vec::new();
        for (i, s) in salaries.iter().enumerate() {
            ids.push(submit(&mut state, &format!("E{i}"), &s.to_string()).unwrap());
        }
        let sum: Decimal = salaries.iter().sum();
        assert_eq!(state.total.monthly, sum / dec!(12));

        state.delete_row(ids[1]);
        assert_eq!(state.total.monthly, (sum - dec!(48000)) / dec!(12));

        for id in ids {
            state.delete_row(id);
        }
        assert_eq!(state.total.display(), "$0.00");
        assert!(state.roster.is_empty());
    }

    #[test]
    fn rejected_submission_leaves_table_and_total_alone() {
        let mut state = AppState::new(AppConfig::default());
        assert_eq!(
            submit(&mut state, "Jane", "n/a"),
            Err(FormError::InvalidSalary("n/a".into()))
        );
        assert!(state.roster.is_empty());
        assert_eq!(state.total.display(), "$0.00");
        assert_eq!(state.status_message.as_deref(), Some("salary 'n/a' is not a number"));
    }

    #[test]
    fn oversized_salary_is_rejected_without_touching_the_total() {
        let mut state = AppState::new(AppConfig::default());
        assert_eq!(
            submit(&mut state, "A", "50000000000000000000000000000"),
            Err(FormError::SalaryTooLarge)
        );
        assert!(state.roster.is_empty());
        assert_eq!(state.total.display(), "$0.00");
        assert_eq!(state.form.focused_field(), Field::Salary);
    }

    #[test]
    fn many_maximum_salaries_keep_an_exact_total() {
        let mut state = AppState::new(AppConfig::default());
        for i in 0..50 {
            submit(&mut state, &format!("E{i}"), "1000000000000").unwrap();
            dismiss(&mut state);
        }
        assert_eq!(state.total.annual, dec!(50000000000000));
        assert_eq!(state.total.display(), "$4,166,666,666,666.67");
        assert!(state.total.over_budget);
    }

    #[test]
    fn refresh_twice_gives_same_display() {
        let mut state = AppState::new(AppConfig::default());
        submit(&mut state, "A", "1001").unwrap();
        let first = state.total.display();
        state.refresh_total();
        assert_eq!(state.total.display(), first);
    }

    #[test]
    fn delete_selected_clamps_selection() {
        let mut state = AppState::new(AppConfig::default());
        submit(&mut state, "A", "1").unwrap();
        submit(&mut state, "B", "2").unwrap();
        state.selected_row = 1;

        let removed = state.delete_selected().map(|e| e.first_name);
        assert_eq!(removed.as_deref(), Some("B"));
        assert_eq!(state.selected_row, 0);

        state.delete_selected();
        assert!(state.delete_selected().is_none());
        assert_eq!(state.selected_row, 0);
    }

    #[test]
    fn custom_budget_from_config() {
        let mut config = AppConfig::default();
        config.monthly_budget = dec!(100);
        let mut state = AppState::new(config);
        submit(&mut state, "A", "1212").unwrap();
        assert_eq!(
            state.active_view,
            ActiveView::BudgetWarning("Warning: Total monthly salary is over $100.00".into())
        );
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        let mut state = AppState::new(AppConfig::default());
        for i in 0..10 {
            submit(&mut state, &format!("E{i}"), "1").unwrap();
        }
        state.selected_row = 7;
        state.scroll_to_selection(3);
        assert_eq!(state.table_offset, 5);
        state.selected_row = 2;
        state.scroll_to_selection(3);
        assert_eq!(state.table_offset, 2);
    }
}
