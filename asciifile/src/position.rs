//! abstraction over the location of a single character within a file.
//!
//! Rows and columns are zero based, meaning the first character of a file is
//! positioned at column `0` in row `0`. Use `line_number()` for the human
//! readable (one based) line.
use std::fmt::{self, Debug, Display};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    row: usize,
    column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn to_single_char_span(self) -> crate::Span {
        crate::Span::from_single_position(self)
    }

    /// Return the row of the character's position within the file.
    ///
    /// The row is zero based, meaning characters on the first line
    /// of the file are in row `0`. To get the line number, add `1` to
    /// the return value.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Return the character's line number.
    /// Identical to `row() + 1`
    pub fn line_number(&self) -> usize {
        self.row + 1
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

impl Display for Position {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{}:{}", self.line_number(), self.column())
    }
}

impl Debug for Position {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Position{{row: {:?}, col: {:?}}}", self.row, self.column)
    }
}
