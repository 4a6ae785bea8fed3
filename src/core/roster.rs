//! The ordered employee table.
//!
//! The [`Roster`] is the single source of truth for what the table shows.
//! Each row carries its own [`DeleteControl`], created once at insertion, so
//! removing a row never depends on where it currently sits in the list.

use rust_decimal::Decimal;

use super::currency::format_whole_dollars;
use super::employee::Employee;

/// Stable identity of a row, independent of its display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

/// The per-row delete action.  Activating it removes exactly the row it was
/// created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteControl {
    pub row: RowId,
}

impl DeleteControl {
    pub const LABEL: &'static str = "[Delete]";

    /// Remove the owning row.  Returns `None` if it was already gone.
    pub fn activate(self, roster: &mut Roster) -> Option<Employee> {
        roster.remove(self.row)
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub id: RowId,
    pub employee: Employee,
    pub delete: DeleteControl,
}

impl Row {
    /// The five data cells in display order.  The delete control is the
    /// sixth column and is rendered separately.
    pub fn cells(&self) -> [String; 5] {
        render_cells(&self.employee)
    }
}

/// Display text for an employee's data columns.
pub fn render_cells(employee: &Employee) -> [String; 5] {
    [
        employee.first_name.clone(),
        employee.last_name.clone(),
        employee.id.clone(),
        employee.title.clone(),
        format_whole_dollars(employee.salary),
    ]
}

#[derive(Debug, Default)]
pub struct Roster {
    rows: Vec<Row>,
    next_id: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the next row lands: always after every existing data row.
    pub fn insert_position(&self) -> usize {
        self.rows.len()
    }

    /// Append `employee` and return the id its delete control targets.
    pub fn insert(&mut self, employee: Employee) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        let at = self.insert_position();
        self.rows.insert(
            at,
            Row {
                id,
                employee,
                delete: DeleteControl { row: id },
            },
        );
        id
    }

    pub fn remove(&mut self, id: RowId) -> Option<Employee> {
        let idx = self.position(id)?;
        Some(self.rows.remove(idx).employee)
    }

    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Salaries of every current row, in display order.
    pub fn salaries(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.rows.iter().map(|r| r.employee.salary)
    }
}
