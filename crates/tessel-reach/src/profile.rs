//! Cumulative distance histograms of a single tile.

use tessel_core::MinMax;

use crate::tiles::TileGrid;

/// How many cells of one tile are reachable within a given budget.
///
/// `cumulative[p][i]` is the number of reached cells with distance
/// `d ≤ range.min + i` and `d % 2 == p`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileProfile {
    range: MinMax,
    cumulative: [Vec<u64>; 2],
}

impl TileProfile {
    pub fn new(tile: &TileGrid) -> Self {
        let range = tile.min_max();
        if range.is_empty() {
            return Self {
                range,
                cumulative: [Vec::new(), Vec::new()],
            };
        }
        let len = range.count() as usize;
        let mut counts = vec![0u64; len];
        for (_, d) in tile.iter() {
            counts[(d as i64 - range.min) as usize] += 1;
        }
        let mut cumulative = [vec![0u64; len], vec![0u64; len]];
        let mut running = [0u64; 2];
        for (i, n) in counts.into_iter().enumerate() {
            let parity = ((range.min + i as i64) % 2) as usize;
            running[parity] += n;
            cumulative[0][i] = running[0];
            cumulative[1][i] = running[1];
        }
        Self { range, cumulative }
    }

    /// Smallest and largest distance in the tile.
    #[inline]
    pub fn range(&self) -> MinMax {
        self.range
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Cells at distance `≤ budget` with the parity of `budget`, i.e. the
    /// cells occupiable after exactly `budget` steps.
    pub fn count_within(&self, budget: i64) -> u64 {
        if self.is_empty() || budget < self.range.min {
            return 0;
        }
        let top = budget.min(self.range.max);
        self.cumulative[budget.rem_euclid(2) as usize][(top - self.range.min) as usize]
    }

    /// Every reached cell of the given parity (0 even, 1 odd).
    pub fn full(&self, parity: i64) -> u64 {
        match self.cumulative[parity.rem_euclid(2) as usize].last() {
            Some(&n) => n,
            None => 0,
        }
    }

    #[inline]
    pub fn full_even(&self) -> u64 {
        self.full(0)
    }

    #[inline]
    pub fn full_odd(&self) -> u64 {
        self.full(1)
    }

    /// For copies of this tile at distances `budget - k * step`, the last
    /// `k` whose copy is completely inside the budget and the last `k`
    /// whose copy is touched at all. `-1` when there is none.
    pub fn find_ns(&self, budget: i64, step: i64) -> (i64, i64) {
        if self.is_empty() || step <= 0 {
            return (-1, -1);
        }
        let last = |edge: i64| {
            if budget < edge {
                -1
            } else {
                (budget - edge) / step
            }
        };
        (last(self.range.max), last(self.range.min))
    }
}
