use tessel_core::Point;

/// Cached neighbor computation helper.
///
/// Enumerates the 4-directional (cardinal) neighbors of a point, filtered by
/// a predicate, reusing one buffer across calls.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return 4-directional (cardinal) neighbors of `p`, keeping only those
    /// for which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_order_and_filter() {
        let mut nb = Neighbors::new();
        let p = Point::new(3, 3);
        assert_eq!(
            nb.cardinal(p, |_| true),
            &[
                Point::new(3, 2),
                Point::new(4, 3),
                Point::new(3, 4),
                Point::new(2, 3)
            ]
        );
        assert_eq!(nb.cardinal(p, |n| n.x >= 3), &[
            Point::new(3, 2),
            Point::new(4, 3),
            Point::new(3, 4)
        ]);
        assert!(nb.cardinal(p, |_| false).is_empty());
    }
}
