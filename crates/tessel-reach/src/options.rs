//! Tuning knobs for [`walk`](crate::walk).

/// How large a window of tile copies the search may use.
///
/// The search starts with `initial_extra` tiles on each side of the base
/// tile and grows one ring at a time, up to `max_extra`, until tile
/// differences at the window edge become uniform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    pub initial_extra: u32,
    pub max_extra: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initial_extra: 2,
            max_extra: 8,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first window size tried (builder).
    pub fn with_initial_extra(mut self, extra: u32) -> Self {
        self.initial_extra = extra;
        self
    }

    /// Set the largest window size tried (builder).
    pub fn with_max_extra(mut self, extra: u32) -> Self {
        self.max_extra = extra;
        self
    }

    /// Use exactly one window size, never growing.
    pub fn fixed(extra: u32) -> Self {
        Self {
            initial_extra: extra,
            max_extra: extra,
        }
    }

    /// A copy with `initial_extra ≥ 1` and `max_extra ≥ initial_extra`.
    ///
    /// One ring of tiles is the least that has an outer and an inner tile to
    /// compare.
    pub fn validated(self) -> Self {
        let initial_extra = self.initial_extra.max(1);
        Self {
            initial_extra,
            max_extra: self.max_extra.max(initial_extra),
        }
    }
}
