//! Monthly payroll total and the budget check.
//!
//! The total is always recomputed from the roster's stored salaries; nothing
//! is adjusted incrementally, so it can never drift from what the table
//! shows.

use rust_decimal::Decimal;

use super::currency::format_cents;
use super::roster::Roster;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Default monthly budget in dollars.
pub const DEFAULT_MONTHLY_BUDGET: Decimal = Decimal::from_parts(20_000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTotal {
    /// Sum of every current annual salary.
    pub annual: Decimal,
    /// `annual / 12`, unrounded.
    pub monthly: Decimal,
    /// `monthly` strictly greater than the budget.
    pub over_budget: bool,
}

impl MonthlyTotal {
    pub fn compute(roster: &Roster, budget: Decimal) -> Self {
        Self::from_salaries(roster.salaries(), budget)
    }

    pub fn from_salaries(salaries: impl IntoIterator<Item = Decimal>, budget: Decimal) -> Self {
        // Saturates at `Decimal::MAX`; the salary ceiling keeps real rosters
        // far below it.
        let annual = salaries.into_iter().fold(Decimal::ZERO, |sum, s| {
            sum.checked_add(s).unwrap_or(Decimal::MAX)
        });
        let monthly = annual / Decimal::from(MONTHS_PER_YEAR);
        Self {
            annual,
            monthly,
            over_budget: exceeds_budget(monthly, budget),
        }
    }

    /// The total as shown on screen, e.g. `$20,000.00`.
    pub fn display(&self) -> String {
        format_cents(self.monthly)
    }
}

impl Default for MonthlyTotal {
    fn default() -> Self {
        Self::from_salaries(std::iter::empty(), DEFAULT_MONTHLY_BUDGET)
    }
}

/// Exactly at budget is fine; a cent over is not.
pub fn exceeds_budget(monthly: Decimal, budget: Decimal) -> bool {
    monthly > budget
}

/// Text of the over-budget dialog.
pub fn budget_warning(budget: Decimal) -> String {
    format!("Warning: Total monthly salary is over {}", format_cents(budget))
}
