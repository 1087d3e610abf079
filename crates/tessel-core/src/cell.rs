//! The [`Cell`] type: one square of the garden.

use std::fmt;

/// A garden cell: either a plot that can be walked on or a rock.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Passable,
    Blocked,
}

impl Cell {
    /// Character used for passable plots in input and dumps.
    pub const PASSABLE_CHAR: char = '.';
    /// Character used for rocks.
    pub const BLOCKED_CHAR: char = '#';
    /// Character marking the start plot in input.
    pub const START_CHAR: char = 'S';

    /// Decode an input character. The start marker decodes as passable.
    #[inline]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            Self::PASSABLE_CHAR | Self::START_CHAR => Some(Self::Passable),
            Self::BLOCKED_CHAR => Some(Self::Blocked),
            _ => None,
        }
    }

    /// The character this cell renders as.
    #[inline]
    pub const fn to_char(self) -> char {
        match self {
            Self::Passable => Self::PASSABLE_CHAR,
            Self::Blocked => Self::BLOCKED_CHAR,
        }
    }

    #[inline]
    pub const fn is_passable(self) -> bool {
        matches!(self, Self::Passable)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_characters() {
        assert_eq!(Cell::from_char('.'), Some(Cell::Passable));
        assert_eq!(Cell::from_char('S'), Some(Cell::Passable));
        assert_eq!(Cell::from_char('#'), Some(Cell::Blocked));
        assert_eq!(Cell::from_char('x'), None);
    }

    #[test]
    fn render_round_trip() {
        for c in [Cell::Passable, Cell::Blocked] {
            assert_eq!(Cell::from_char(c.to_char()), Some(c));
        }
        assert!(Cell::default().is_passable());
        assert!(!Cell::Blocked.is_passable());
    }
}
