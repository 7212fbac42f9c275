//! Column sort indicators.
//!
//! Each column carries a three-state indicator; at most one column is sorted.

use crate::api::Row;

/// Sort state of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortState {
    #[default]
    None = 0,
    Ascending = 1,
    Descending = 2,
}

impl SortState {
    /// Next state on click: none -> ascending -> descending -> none.
    pub fn next(self) -> Self {
        match self {
            SortState::None => SortState::Ascending,
            SortState::Ascending => SortState::Descending,
            SortState::Descending => SortState::None,
        }
    }

    /// Value sent as the `sortstate` query parameter.
    pub fn wire_value(self) -> u8 {
        self as u8
    }

    /// Header glyph for this state.
    pub fn symbol(self) -> &'static str {
        match self {
            SortState::None => "↕",
            SortState::Ascending => "▲",
            SortState::Descending => "▼",
        }
    }
}

/// Sort indicators for every column of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortIndicators {
    states: Vec<SortState>,
}

impl SortIndicators {
    /// Create indicators for `columns` columns, all unsorted.
    pub fn new(columns: usize) -> Self {
        Self {
            states: vec![SortState::None; columns],
        }
    }

    /// Advance the indicator of `column` and reset all others.
    ///
    /// # Arguments
    /// * `column` - Column index; out-of-range indices are ignored
    ///
    /// # Returns
    /// * `SortState` - New state of `column`
    pub fn cycle(&mut self, column: usize) -> SortState {
        let Some(current) = self.states.get(column).copied() else {
            return SortState::None;
        };
        let next = current.next();
        self.states.fill(SortState::None);
        self.states[column] = next;
        next
    }

    /// State of `column`.
    pub fn state(&self, column: usize) -> SortState {
        self.states.get(column).copied().unwrap_or_default()
    }

    /// The sorted column and its direction, if any.
    pub fn active(&self) -> Option<(usize, SortState)> {
        self.states
            .iter()
            .enumerate()
            .find(|(_, s)| **s != SortState::None)
            .map(|(i, s)| (i, *s))
    }
}

/// Sort rows in place by the string value of `column`.
///
/// The sort is stable and compares cells lexicographically, so `"10"` sorts
/// before `"9"`.
pub fn sort_rows(rows: &mut [Row], column: usize, state: SortState) {
    match state {
        SortState::None => {}
        SortState::Ascending => rows.sort_by(|a, b| a.cell(column).cmp(b.cell(column))),
        SortState::Descending => rows.sort_by(|a, b| b.cell(column).cmp(a.cell(column))),
    }
}
