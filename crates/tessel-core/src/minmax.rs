//! Inclusive integer spans.

use std::fmt;

/// An inclusive range `[min, max]` that grows as values are included.
///
/// An empty span holds the sentinel extremes (`min = i64::MAX`,
/// `max = i64::MIN`), so the first [`include`](Self::include) sets both ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinMax {
    pub min: i64,
    pub max: i64,
}

impl MinMax {
    /// The empty span.
    pub const EMPTY: Self = Self {
        min: i64::MAX,
        max: i64::MIN,
    };

    /// Create a span covering both ends, whichever order they are given in.
    #[inline]
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Whether no value has been included yet.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min > self.max
    }

    /// Grow the span so that it contains `v`.
    #[inline]
    pub fn include(&mut self, v: i64) {
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }

    /// Number of integers in the span (0 when empty).
    #[inline]
    pub fn count(self) -> u64 {
        if self.is_empty() {
            0
        } else {
            (self.max - self.min) as u64 + 1
        }
    }
}

impl Default for MinMax {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl FromIterator<i64> for MinMax {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        let mut mm = Self::EMPTY;
        for v in iter {
            mm.include(v);
        }
        mm
    }
}

impl fmt::Display for MinMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("[]")
        } else {
            write!(f, "[{}, {}]", self.min, self.max)
        }
    }
}
