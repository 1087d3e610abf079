//! Errors raised by the reachability pipeline.

use std::fmt;

use tessel_core::{GridError, Point};

/// Why a count could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input text is not a valid garden.
    Grid(GridError),
    /// Tile-to-tile distance differences at the edge of the search window
    /// are not one constant, so extrapolating from them would be wrong.
    /// `sections` lists the outer tiles where the check failed.
    NonUniformPeriodicity { extra: u32, sections: Vec<Point> },
    /// The start cell is a rock or lies outside the base tile.
    UnreachableStart(Point),
    /// The count for `steps` does not fit in a `u64`.
    CountOverflow { steps: u64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "malformed grid: {e}"),
            Self::NonUniformPeriodicity { extra, sections } => {
                write!(f, "tile diffs are not uniform with extra = {extra}")?;
                if !sections.is_empty() {
                    f.write_str(" at sections")?;
                    for s in sections {
                        write!(f, " {s}")?;
                    }
                }
                Ok(())
            }
            Self::UnreachableStart(p) => write!(f, "start {p} is not a plot of the base tile"),
            Self::CountOverflow { steps } => {
                write!(f, "count for {steps} steps does not fit in 64 bits")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for Error {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
