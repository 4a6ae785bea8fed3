//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and the app state and turns
//! them into cells on the terminal.  No state is mutated here.

pub mod form;
pub mod layout;
pub mod popup;
pub mod table;
pub mod theme;
pub mod total;

/// Flatten a rendered buffer into one string per row.
#[cfg(test)]
pub(crate) fn buffer_lines(buf: &ratatui::buffer::Buffer) -> Vec<String> {
    let area = buf.area;
    (area.top()..area.bottom())
        .map(|y| {
            (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect()
        })
        .collect()
}
