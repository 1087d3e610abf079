use std::collections::HashSet;

use tessel_core::{Grid, Point, Range};

use crate::neighbors::Neighbors;

/// Count the cells that can be occupied after exactly `steps` steps by
/// literally replaying the walk one layer at a time.
///
/// Each layer is the set of passable neighbors of the previous layer, so
/// stepping back and forth is allowed. With `bounds` the walk may not leave
/// that rectangle; without it the grid repeats over the whole plane. Cost
/// grows with `steps²`, so this is only meant as an oracle for small budgets.
pub fn replay_count(grid: &Grid, start: Point, steps: u64, bounds: Option<Range>) -> u64 {
    let keep = |p: Point| bounds.is_none_or(|r| r.contains(p)) && grid.is_passable(p);

    let mut nb = Neighbors::new();
    let mut layer: HashSet<Point> = HashSet::from([start]);
    let mut next: HashSet<Point> = HashSet::new();

    for _ in 0..steps {
        next.clear();
        for &p in &layer {
            next.extend(nb.cardinal(p, &keep).iter().copied());
        }
        std::mem::swap(&mut layer, &mut next);
        if layer.is_empty() {
            break;
        }
    }
    layer.len() as u64
}
