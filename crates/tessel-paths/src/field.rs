use tessel_core::{Point, Range};

/// Sentinel value meaning "unreachable" in a [`DistanceField`].
pub const UNREACHABLE: i32 = i32::MAX;

/// Minimum step counts from the start to every cell of a search window.
///
/// Stored as a flat row-major array over the window rectangle; cells the
/// search never reached hold [`UNREACHABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceField {
    window: Range,
    width: usize,
    costs: Vec<i32>,
}

impl DistanceField {
    /// An empty field over `window`.
    pub fn new(window: Range) -> Self {
        Self {
            window,
            width: window.width().max(0) as usize,
            costs: vec![UNREACHABLE; window.len()],
        }
    }

    /// Record `cost` at `p`. Points outside the window are ignored.
    pub(crate) fn set(&mut self, p: Point, cost: i32) {
        if let Some(i) = self.idx(p) {
            self.costs[i] = cost;
        }
    }

    /// The searched rectangle.
    #[inline]
    pub fn window(&self) -> Range {
        self.window
    }

    /// Cost at `p`, or [`UNREACHABLE`] if `p` was not reached or lies
    /// outside the window.
    #[inline]
    pub fn get(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.costs[i],
            None => UNREACHABLE,
        }
    }

    #[inline]
    pub fn is_reached(&self, p: Point) -> bool {
        self.get(p) != UNREACHABLE
    }

    /// Iterate over reached cells and their costs, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, i32)> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != UNREACHABLE)
            .map(|(i, &c)| (self.point(i), c))
    }

    /// Number of reached cells.
    pub fn reached(&self) -> usize {
        self.costs.iter().filter(|&&c| c != UNREACHABLE).count()
    }

    /// Largest recorded cost, if anything was reached.
    pub fn max_cost(&self) -> Option<i32> {
        self.iter().map(|(_, c)| c).max()
    }

    /// Smallest cost recorded on the window's outermost ring, or
    /// [`UNREACHABLE`] if the search never touched the border.
    ///
    /// Every walk shorter than this stays strictly inside the window, so
    /// counts for budgets below it need no extrapolation.
    pub fn border_min(&self) -> i32 {
        self.iter()
            .filter(|&(p, _)| self.window.on_border(p))
            .map(|(_, c)| c)
            .min()
            .unwrap_or(UNREACHABLE)
    }

    /// Number of cells that can be occupied after exactly `steps` steps:
    /// cost at most `steps` and of the same parity.
    pub fn count_exact(&self, steps: u64) -> u64 {
        self.costs
            .iter()
            .filter(|&&c| c != UNREACHABLE && parity_match(c, steps))
            .count() as u64
    }

    /// The cells counted by [`count_exact`](Self::count_exact).
    pub fn solutions(&self, steps: u64) -> Vec<Point> {
        self.iter()
            .filter(|&(_, c)| parity_match(c, steps))
            .map(|(p, _)| p)
            .collect()
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.window.contains(p) {
            return None;
        }
        let x = (p.x - self.window.min.x) as usize;
        let y = (p.y - self.window.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.window.min.x;
        let y = (idx / self.width) as i32 + self.window.min.y;
        Point::new(x, y)
    }
}

#[inline]
fn parity_match(cost: i32, steps: u64) -> bool {
    let cost = cost as u64;
    cost <= steps && cost % 2 == steps % 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond(window: Range, radius: i32) -> DistanceField {
        let mut f = DistanceField::new(window);
        for p in window {
            if p.norm_l1() <= radius {
                f.set(p, p.norm_l1());
            }
        }
        f
    }

    #[test]
    fn index_round_trip() {
        let f = DistanceField::new(Range::new(-3, -2, 4, 5));
        for (i, p) in f.window().iter().enumerate() {
            assert_eq!(f.idx(p), Some(i));
            assert_eq!(f.point(i), p);
        }
        assert_eq!(f.idx(Point::new(4, 0)), None);
        assert_eq!(f.get(Point::new(100, 100)), UNREACHABLE);
    }

    #[test]
    fn counts_respect_parity() {
        let f = diamond(Range::new(-5, -5, 6, 6), 3);
        assert_eq!(f.reached(), 25);
        assert_eq!(f.max_cost(), Some(3));
        // distance 0 and 2: 1 + 8
        assert_eq!(f.count_exact(2), 9);
        // distance 1 and 3: 4 + 12
        assert_eq!(f.count_exact(3), 16);
        assert_eq!(f.count_exact(1), 4);
        assert_eq!(f.count_exact(0), 1);
        assert_eq!(f.solutions(1).len(), 4);
        assert!(f.solutions(2).contains(&Point::ZERO));
    }

    #[test]
    fn border_min_of_clipped_diamond() {
        let f = diamond(Range::new(-2, -2, 3, 3), 10);
        // (0, -2) is the closest border cell.
        assert_eq!(f.border_min(), 2);
        let inner = diamond(Range::new(-5, -5, 6, 6), 3);
        assert_eq!(inner.border_min(), UNREACHABLE);
        assert!(inner.is_reached(Point::new(1, 2)));
        assert!(!inner.is_reached(Point::new(2, 2)));
    }
}
