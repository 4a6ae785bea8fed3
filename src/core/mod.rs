//! Core payroll model – employees, the roster, currency formatting and totals.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod currency;
pub mod employee;
pub mod payroll;
pub mod roster;
