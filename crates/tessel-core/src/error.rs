//! Errors raised while parsing a garden.

use std::fmt;

use crate::geom::Point;

/// The input text does not describe a valid garden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// There are no rows (or only blank lines).
    Empty,
    /// A row's width differs from the first row's.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.`, `#` or `S` was found.
    InvalidChar { ch: char, pos: Point },
    /// No `S` marker.
    MissingStart,
    /// More than one `S` marker.
    DuplicateStart { first: Point, second: Point },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("grid: no rows"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} is {found} cells wide, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid: invalid character {ch:?} at {pos}")
            }
            Self::MissingStart => f.write_str("grid: no start marker"),
            Self::DuplicateStart { first, second } => {
                write!(f, "grid: second start marker at {second} (first at {first})")
            }
        }
    }
}

impl std::error::Error for GridError {}
