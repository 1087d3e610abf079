use tessel_core::Point;

/// Manhattan (L1) distance between two points.
///
/// A lower bound on the number of steps between them in any garden.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a - b).norm_l1()
}
