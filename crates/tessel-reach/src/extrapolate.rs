//! Counting reachable cells far beyond the searched window.
//!
//! Each window tile stands for itself if it is inside the window, for a
//! whole line of copies if it is on one edge, and for a quarter-plane of
//! copies if it is a corner. A copy `k` tiles further out has every
//! distance increased by `k * diff`, so its contribution is read from the
//! window tile's [`TileProfile`] with a reduced budget.

use std::collections::HashMap;

use tessel_core::Point;

use crate::classify::{Classification, SectionDiff};
use crate::error::Error;
use crate::profile::TileProfile;
use crate::tiles::TileSet;

/// The breakdown of an extrapolated count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extrapolation {
    pub total: u64,
    /// Cells contributed by copies entirely within the budget.
    pub full_count: u64,
    /// Cells contributed by copies the budget only partly covers.
    pub partial_count: u64,
    pub full_tiles: u64,
    pub partial_tiles: u64,
    /// Reached cells of the base tile with even and odd distance.
    pub full_even: u64,
    pub full_odd: u64,
    pub section_diff: SectionDiff,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Tally {
    full_tiles: u64,
    full_count: u64,
    partial_tiles: u64,
    partial_count: u64,
}

impl Tally {
    /// `None` if any field overflows.
    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            full_tiles: self.full_tiles.checked_add(rhs.full_tiles)?,
            full_count: self.full_count.checked_add(rhs.full_count)?,
            partial_tiles: self.partial_tiles.checked_add(rhs.partial_tiles)?,
            partial_count: self.partial_count.checked_add(rhs.partial_count)?,
        })
    }
}

/// Extrapolates a classified [`TileSet`] to arbitrary step budgets.
#[derive(Debug, Clone)]
pub struct Extrapolator {
    section_diff: SectionDiff,
    profiles: HashMap<Point, TileProfile>,
    /// Every window tile with its [`TileSet::on_edge`] flags.
    placement: Vec<(Point, (bool, bool))>,
}

impl Extrapolator {
    pub fn new(tiles: &TileSet, classification: &Classification) -> Self {
        let placement: Vec<_> = tiles.indices().map(|idx| (idx, tiles.on_edge(idx))).collect();
        let profiles = placement
            .iter()
            .filter_map(|&(idx, _)| Some((idx, TileProfile::new(tiles.get(idx)?))))
            .collect();
        Self {
            section_diff: classification.section_diff,
            profiles,
            placement,
        }
    }

    #[inline]
    pub fn section_diff(&self) -> SectionDiff {
        self.section_diff
    }

    pub fn profile(&self, index: Point) -> Option<&TileProfile> {
        self.profiles.get(&index)
    }

    /// Cells occupiable after exactly `steps` steps on the infinite plane.
    ///
    /// Fails with [`Error::CountOverflow`] when `steps` does not fit in an
    /// `i64` or any partial sum leaves `u64`.
    pub fn count(&self, steps: u64) -> Result<Extrapolation, Error> {
        let overflow = || Error::CountOverflow { steps };
        let budget = i64::try_from(steps).map_err(|_| overflow())?;
        let SectionDiff {
            horizontal,
            vertical,
        } = self.section_diff;

        let mut tally = Tally::default();
        for &(idx, edge) in &self.placement {
            let Some(p) = self.profiles.get(&idx) else {
                continue;
            };
            let part = match edge {
                (false, false) => single(p, budget),
                (true, false) => sum_line(p, budget, horizontal),
                (false, true) => sum_line(p, budget, vertical),
                (true, true) => sum_corner(p, budget, horizontal, vertical),
            }
            .ok_or_else(overflow)?;
            log::trace!("tile {idx}: {part:?}");
            tally = tally.checked_add(part).ok_or_else(overflow)?;
        }

        let (full_even, full_odd) = self
            .profiles
            .get(&Point::ZERO)
            .map_or((0, 0), |p| (p.full_even(), p.full_odd()));
        let result = Extrapolation {
            total: tally
                .full_count
                .checked_add(tally.partial_count)
                .ok_or_else(overflow)?,
            full_count: tally.full_count,
            partial_count: tally.partial_count,
            full_tiles: tally.full_tiles,
            partial_tiles: tally.partial_tiles,
            full_even,
            full_odd,
            section_diff: self.section_diff,
        };
        log::debug!(
            "{steps} steps: {} full tiles ({} cells), {} partial tiles ({} cells)",
            result.full_tiles,
            result.full_count,
            result.partial_tiles,
            result.partial_count
        );
        Ok(result)
    }
}

/// One copy at `budget`.
fn single(p: &TileProfile, budget: i64) -> Option<Tally> {
    let range = p.range();
    let tally = if p.is_empty() || budget < range.min {
        Tally::default()
    } else if budget >= range.max {
        Tally {
            full_tiles: 1,
            full_count: p.full(budget),
            ..Tally::default()
        }
    } else {
        Tally {
            partial_tiles: 1,
            partial_count: p.count_within(budget),
            ..Tally::default()
        }
    };
    Some(tally)
}

/// Copies at budgets `budget - k * step` for `k = 0, 1, ...` until the copy
/// is out of reach. The fully covered copies are summed in closed form.
fn sum_line(p: &TileProfile, budget: i64, step: Option<i64>) -> Option<Tally> {
    let Some(step) = step.filter(|&s| s > 0) else {
        return single(p, budget);
    };
    let (full_n, part_n) = p.find_ns(budget, step);
    let mut tally = Tally::default();
    if full_n >= 0 {
        let copies = u64::try_from(full_n).ok()?.checked_add(1)?;
        let parity = budget.rem_euclid(2);
        tally.full_tiles = copies;
        tally.full_count = if step % 2 == 0 {
            copies.checked_mul(p.full(parity))?
        } else {
            // Parity alternates with k.
            let same = u64::try_from(full_n / 2).ok()?.checked_add(1)?;
            let other = copies - same;
            same
                .checked_mul(p.full(parity))?
                .checked_add(other.checked_mul(p.full(1 - parity))?)?
        };
    }
    for k in (full_n + 1)..=part_n {
        tally.partial_tiles = tally.partial_tiles.checked_add(1)?;
        tally.partial_count = tally
            .partial_count
            .checked_add(p.count_within(budget - k * step))?;
    }
    Some(tally)
}

/// A quarter-plane of copies: one line along y for every step along x.
fn sum_corner(p: &TileProfile, budget: i64, dx: Option<i64>, dy: Option<i64>) -> Option<Tally> {
    let Some(dx) = dx.filter(|&d| d > 0) else {
        return sum_line(p, budget, dy);
    };
    let mut tally = Tally::default();
    if p.is_empty() {
        return Some(tally);
    }
    let mut b = budget;
    while b >= p.range().min {
        tally = tally.checked_add(sum_line(p, b, dy)?)?;
        b -= dx;
    }
    Some(tally)
}
