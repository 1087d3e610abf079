//! How the count grows with the step budget.

use tessel_core::Garden;

use crate::error::Error;
use crate::options::Options;
use crate::settle;

/// Counts for a run of step budgets of the same parity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GrowthSeries {
    pub steps: Vec<u64>,
    pub counts: Vec<u64>,
}

impl GrowthSeries {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Finite differences of the given order (order 0 is the counts).
    pub fn differences(&self, order: usize) -> Vec<i128> {
        let mut d: Vec<i128> = self.counts.iter().map(|&c| c as i128).collect();
        for _ in 0..order {
            d = d.windows(2).map(|w| w[1] - w[0]).collect();
        }
        d
    }

    /// `(steps, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.steps.iter().copied().zip(self.counts.iter().copied())
    }
}

/// Counts for `from, from + 2, ...` up to and including `to`.
///
/// A single window large enough for `to` answers every budget, so the
/// search runs once per window size tried rather than once per budget.
pub fn growth_series(
    garden: &Garden,
    from: u64,
    to: u64,
    options: &Options,
) -> Result<GrowthSeries, Error> {
    let mut series = GrowthSeries::default();
    if from > to {
        return Ok(series);
    }
    let (mut survey, _) = settle(garden, to, options)?;
    for steps in (from..=to).step_by(2) {
        let count = match survey.as_mut() {
            Some(s) => s.count(steps)?.count,
            None => u64::from(steps == 0),
        };
        series.steps.push(steps);
        series.counts.push(count);
    }
    log::debug!("growth series of {} budgets from {from} to {to}", series.len());
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{Grid, Point};

    const SAMPLE: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    #[test]
    fn open_plane_grows_quadratically() {
        let garden = Garden::new(Grid::open(5, 5), Point::new(2, 2));
        let s = growth_series(&garden, 10, 30, &Options::default()).unwrap();
        assert_eq!(s.steps, vec![10, 12, 14, 16, 18, 20, 22, 24, 26, 28, 30]);
        assert_eq!(s.counts[0], 121);
        assert!(s.differences(2).iter().all(|&d| d == 8));
        assert_eq!(s.differences(0).len(), s.len());
        assert_eq!(s.iter().last(), Some((30, 961)));
    }

    #[test]
    fn sample_budgets() {
        let garden = Garden::parse(SAMPLE).unwrap();
        let s = growth_series(&garden, 6, 10, &Options::default()).unwrap();
        assert_eq!(s.counts, vec![16, 30, 50]);
        let s = growth_series(&garden, 0, 11, &Options::default()).unwrap();
        assert_eq!(s.counts, vec![1, 4, 9, 16, 30, 50]);
    }

    #[test]
    fn empty_range() {
        let garden = Garden::new(Grid::open(3, 3), Point::new(1, 1));
        assert!(growth_series(&garden, 5, 4, &Options::default()).unwrap().is_empty());
    }
}
