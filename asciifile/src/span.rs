//! # Input File Ranges
//!
//! A `Span` is a range of the input file described by the line and column of
//! its first and last character.
//!
//! A `Span` is immutable. Mutations will always return a new instance.
//!
//! The range defined by the start and end position of a `Span` is inclusive on
//! the both sides (lower and upper bound). Beware that this is not equivalent
//! to rusts behaviour on ranges, which will not contain the upper bound if
//! `low..high` is used. This also means that you cannot create an empty
//! `Span`.
//!
//! Analog to [`Position`](struct.Position.html), rows and columns are zero
//! indexed.
use crate::Position;
use std::{
    cmp::{max, min},
    fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// position of the first char in the span.
    start: Position,
    /// position of the last char in the span.
    end: Position,
}

impl Span {
    pub fn new(a: Position, b: Position) -> Self {
        Self {
            start: min(a, b),
            end: max(a, b),
        }
    }

    /// Creates a span containing only the given position
    ///
    /// ```
    /// use asciifile::{Position, Span};
    ///
    /// let span = Span::from_single_position(Position::new(0, 2));
    /// assert!(span.is_single_char());
    /// assert_eq!("1:2", span.to_string());
    /// ```
    pub fn from_single_position(position: Position) -> Self {
        Self {
            start: position,
            end: position,
        }
    }

    pub fn is_single_char(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_char() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
