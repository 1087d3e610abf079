use tessel_core::{Grid, Point};

use crate::traits::Pather;

/// [`Pather`] over the infinite tiling of a [`Grid`]: a neighbor is offered
/// whenever its cell, after wraparound, is passable.
///
/// Window bounds are enforced by the search itself, not here.
#[derive(Debug, Clone, Copy)]
pub struct GardenPather<'a> {
    grid: &'a Grid,
}

impl<'a> GardenPather<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    /// Whether `p` has at least one passable neighbor.
    pub fn can_move(&self, p: Point) -> bool {
        p.neighbors_4().into_iter().any(|n| self.grid.is_passable(n))
    }
}

impl Pather for GardenPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(
            p.neighbors_4()
                .into_iter()
                .filter(|&n| self.grid.is_passable(n)),
        );
    }
}
