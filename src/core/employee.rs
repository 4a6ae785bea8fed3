//! Employee record and salary parsing.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use super::currency::format_whole_dollars;

/// Largest accepted annual salary: one trillion dollars.  Far more rows
/// than fit in memory would be needed for the roster total to reach
/// `Decimal::MAX`.
pub const MAX_SALARY: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// One of the five named inputs an employee is entered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Id,
    Title,
    Salary,
}

impl Field {
    /// Form order.
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Id,
        Field::Title,
        Field::Salary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First name",
            Field::LastName => "Last name",
            Field::Id => "ID",
            Field::Title => "Title",
            Field::Salary => "Salary",
        }
    }

    /// Form-data name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Id => "id",
            Field::Title => "title",
            Field::Salary => "salary",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a submission is refused before it reaches the table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(Field),

    #[error("salary '{0}' is not a number")]
    InvalidSalary(String),

    #[error("salary cannot be negative")]
    NegativeSalary,

    #[error("salary must be a whole dollar amount")]
    FractionalSalary,

    #[error("salary cannot exceed {}", format_whole_dollars(MAX_SALARY))]
    SalaryTooLarge,
}

impl FormError {
    /// The input the error should be shown against.
    pub fn field(&self) -> Field {
        match self {
            FormError::Missing(field) => *field,
            FormError::InvalidSalary(_)
            | FormError::NegativeSalary
            | FormError::FractionalSalary
            | FormError::SalaryTooLarge => Field::Salary,
        }
    }
}

/// A single payroll entry.  The salary is kept as a number, never as
/// display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
    pub id: String,
    pub title: String,
    /// Annual salary in whole dollars.
    pub salary: Decimal,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Parse salary input the way a numeric form control would accept it.
///
/// Every character other than a digit, `.` or `-` is dropped first, so
/// pasted values such as `$240,000` are accepted.
pub fn parse_salary(raw: &str) -> Result<Decimal, FormError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        return Err(FormError::InvalidSalary(raw.trim().to_string()));
    }

    let salary: Decimal = cleaned
        .parse()
        .map_err(|_| FormError::InvalidSalary(raw.trim().to_string()))?;

    if salary.is_sign_negative() && !salary.is_zero() {
        return Err(FormError::NegativeSalary);
    }
    if !salary.fract().is_zero() {
        return Err(FormError::FractionalSalary);
    }
    if salary > MAX_SALARY {
        return Err(FormError::SalaryTooLarge);
    }
    Ok(salary.normalize())
}
