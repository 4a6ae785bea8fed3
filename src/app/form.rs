//! Employee entry form.
//!
//! Five single-line inputs, one per [`Field`].  Submitting applies the
//! constraints a native form would (required values, numeric salary), hands
//! back the [`Employee`] and resets every input.

use crate::core::employee::{parse_salary, Employee, Field, FormError};

/// A single-line text input with a char-indexed cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    /// Cursor position in chars, not bytes.
    pub cursor: usize,
}

impl TextInput {
    fn byte_index(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

#[derive(Debug, Default)]
pub struct EmployeeForm {
    inputs: [TextInput; 5],
    focused: usize,
    error: Option<FormError>,
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_field(&self) -> Field {
        Field::ALL[self.focused]
    }

    pub fn input(&self, field: Field) -> &TextInput {
        &self.inputs[Self::index(field)]
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        self.error = None;
        &mut self.inputs[self.focused]
    }

    /// The last rejected submission, if it has not been edited since.
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = Self::index(field);
    }

    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % Field::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focused = (self.focused + Field::ALL.len() - 1) % Field::ALL.len();
    }

    /// Set a field's contents directly, cursor at the end.
    pub fn set(&mut self, field: Field, value: &str) {
        let input = &mut self.inputs[Self::index(field)];
        input.value = value.to_string();
        input.move_end();
    }

    /// Empty every input and focus the first one.
    pub fn reset(&mut self) {
        for input in &mut self.inputs {
            input.clear();
        }
        self.focused = 0;
        self.error = None;
    }

    /// Validate the inputs and, on success, return the employee and reset
    /// the form.  On failure the inputs are kept and the offending field is
    /// focused.
    pub fn submit(&mut self) -> Result<Employee, FormError> {
        match self.read() {
            Ok(employee) => {
                self.reset();
                Ok(employee)
            }
            Err(e) => {
                self.focus(e.field());
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn read(&self) -> Result<Employee, FormError> {
        for field in Field::ALL {
            let value = &self.input(field).value;
            // A numeric input drops whitespace, so a blank salary is empty.
            let blank = match field {
                Field::Salary => value.trim().is_empty(),
                _ => value.is_empty(),
            };
            if blank {
                return Err(FormError::Missing(field));
            }
        }
        let text = |field: Field| self.input(field).value.trim().to_string();
        Ok(Employee {
            first_name: text(Field::FirstName),
            last_name: text(Field::LastName),
            id: text(Field::Id),
            title: text(Field::Title),
            salary: parse_salary(&self.input(Field::Salary).value)?,
        })
    }

    fn index(field: Field) -> usize {
        Field::ALL
            .iter()
            .position(|f| *f == field)
            .unwrap_or_default()
    }
}
