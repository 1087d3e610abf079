use tessel_core::Point;

/// Minimal search interface: provides neighbor enumeration.
///
/// Every edge has unit cost.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}
