//! The search window cut into tile-sized blocks.

use std::collections::HashMap;

use tessel_core::{MinMax, Point, Range};
use tessel_paths::{DistanceField, UNREACHABLE};

/// Distances for one copy of the base tile, in local coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    size: Point,
    costs: Vec<i32>,
}

impl TileGrid {
    /// A tile where nothing is reached.
    pub fn new(size: Point) -> Self {
        let len = (size.x.max(0) * size.y.max(0)) as usize;
        Self {
            size,
            costs: vec![UNREACHABLE; len],
        }
    }

    #[inline]
    pub fn size(&self) -> Point {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.size.x, self.size.y)
    }

    /// Cost at a local coordinate, [`UNREACHABLE`] outside the tile.
    pub fn get(&self, local: Point) -> i32 {
        match self.idx(local) {
            Some(i) => self.costs[i],
            None => UNREACHABLE,
        }
    }

    pub(crate) fn set(&mut self, local: Point, cost: i32) {
        if let Some(i) = self.idx(local) {
            self.costs[i] = cost;
        }
    }

    #[inline]
    pub fn is_reached(&self, local: Point) -> bool {
        self.get(local) != UNREACHABLE
    }

    /// Reached cells and their costs, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Point, i32)> + '_ {
        self.bounds()
            .iter()
            .zip(self.costs.iter().copied())
            .filter(|&(_, c)| c != UNREACHABLE)
    }

    pub fn reached(&self) -> usize {
        self.costs.iter().filter(|&&c| c != UNREACHABLE).count()
    }

    /// Smallest and largest reached cost. Empty if nothing was reached.
    pub fn min_max(&self) -> MinMax {
        self.iter().map(|(_, c)| c as i64).collect()
    }

    /// Cell-wise `self - inner`.
    ///
    /// Cells reached in only one of the two tiles are counted as
    /// mismatches and carry no value.
    pub fn diff(&self, inner: &TileGrid) -> DiffGrid {
        let mut values = Vec::with_capacity(self.costs.len());
        let mut mismatched = 0;
        for (&a, &b) in self.costs.iter().zip(inner.costs.iter()) {
            match (a != UNREACHABLE, b != UNREACHABLE) {
                (true, true) => values.push(Some(a as i64 - b as i64)),
                (false, false) => values.push(None),
                _ => {
                    mismatched += 1;
                    values.push(None);
                }
            }
        }
        DiffGrid {
            size: self.size,
            values,
            mismatched,
        }
    }

    #[inline]
    fn idx(&self, local: Point) -> Option<usize> {
        if !self.bounds().contains(local) {
            return None;
        }
        Some((local.y * self.size.x + local.x) as usize)
    }
}

/// Cell-wise difference between two tiles, see [`TileGrid::diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffGrid {
    size: Point,
    values: Vec<Option<i64>>,
    mismatched: usize,
}

impl DiffGrid {
    #[inline]
    pub fn size(&self) -> Point {
        self.size
    }

    pub fn get(&self, local: Point) -> Option<i64> {
        if !Range::new(0, 0, self.size.x, self.size.y).contains(local) {
            return None;
        }
        self.values[(local.y * self.size.x + local.x) as usize]
    }

    /// Number of cells reached in exactly one of the two tiles.
    #[inline]
    pub fn mismatched(&self) -> usize {
        self.mismatched
    }

    /// Range of the defined differences.
    pub fn min_max(&self) -> MinMax {
        self.values.iter().flatten().copied().collect()
    }

    /// Whether both tiles were reached on the same cells and every
    /// defined difference is the same.
    pub fn is_uniform(&self) -> bool {
        self.mismatched == 0 && self.min_max().count() <= 1
    }

    /// The difference shared by every cell. `None` if the diff is not
    /// uniform or neither tile was reached.
    pub fn value(&self) -> Option<i64> {
        let mm = self.min_max();
        (self.is_uniform() && !mm.is_empty()).then_some(mm.min)
    }
}

/// The `(2 * extra + 1)²` tiles of a search window, keyed by tile index.
///
/// The base tile has index `(0, 0)`; the window's outermost tiles have an
/// index component equal to `±extra`.
#[derive(Debug, Clone)]
pub struct TileSet {
    extra: i32,
    tile_size: Point,
    tiles: HashMap<Point, TileGrid>,
}

impl TileSet {
    /// Cut `field` into tiles of `tile_size`. Reached cells outside the
    /// `extra` block are ignored.
    pub fn from_field(field: &DistanceField, tile_size: Point, extra: u32) -> Self {
        let extra = extra as i32;
        let mut tiles: HashMap<Point, TileGrid> = Self::block(extra)
            .iter()
            .map(|idx| (idx, TileGrid::new(tile_size)))
            .collect();
        for (p, cost) in field.iter() {
            let (idx, local) = p.split_tile(tile_size);
            if let Some(tile) = tiles.get_mut(&idx) {
                tile.set(local, cost);
            }
        }
        log::trace!(
            "partitioned {} reached cells into {} tiles",
            field.reached(),
            tiles.len()
        );
        Self {
            extra,
            tile_size,
            tiles,
        }
    }

    #[inline]
    pub fn extra(&self) -> i32 {
        self.extra
    }

    #[inline]
    pub fn tile_size(&self) -> Point {
        self.tile_size
    }

    /// All tile indices, row by row.
    pub fn indices(&self) -> impl Iterator<Item = Point> + use<> {
        Self::block(self.extra).iter()
    }

    pub fn get(&self, index: Point) -> Option<&TileGrid> {
        self.tiles.get(&index)
    }

    /// Whether `index` is on the outermost ring along x, along y.
    pub fn on_edge(&self, index: Point) -> (bool, bool) {
        (index.x.abs() == self.extra, index.y.abs() == self.extra)
    }

    /// Total reached cells over every tile.
    pub fn reached(&self) -> usize {
        self.tiles.values().map(TileGrid::reached).sum()
    }

    fn block(extra: i32) -> Range {
        Range::new(-extra, -extra, extra + 1, extra + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::Grid;
    use tessel_paths::{GardenPather, Solver};

    fn tile(size: Point, cells: &[(i32, i32, i32)]) -> TileGrid {
        let mut t = TileGrid::new(size);
        for &(x, y, c) in cells {
            t.set(Point::new(x, y), c);
        }
        t
    }

    #[test]
    fn tile_accessors() {
        let t = tile(Point::new(3, 2), &[(0, 0, 7), (2, 1, 4)]);
        assert_eq!(t.reached(), 2);
        assert_eq!(t.get(Point::new(2, 1)), 4);
        assert_eq!(t.get(Point::new(3, 1)), UNREACHABLE);
        assert!(!t.is_reached(Point::new(1, 1)));
        assert_eq!(t.min_max(), MinMax::new(4, 7));
        let cells: Vec<_> = t.iter().collect();
        assert_eq!(cells, vec![(Point::new(0, 0), 7), (Point::new(2, 1), 4)]);
        assert!(TileGrid::new(Point::new(2, 2)).min_max().is_empty());
    }

    #[test]
    fn diff_uniform_and_mismatch() {
        let size = Point::new(2, 2);
        let outer = tile(size, &[(0, 0, 15), (1, 0, 16), (1, 1, 17)]);
        let inner = tile(size, &[(0, 0, 4), (1, 0, 5), (1, 1, 6)]);
        let d = outer.diff(&inner);
        assert_eq!(d.mismatched(), 0);
        assert!(d.is_uniform());
        assert_eq!(d.value(), Some(11));
        assert_eq!(d.get(Point::new(0, 1)), None);
        assert_eq!(d.get(Point::new(1, 1)), Some(11));

        let skewed = tile(size, &[(0, 0, 15), (1, 0, 17), (1, 1, 17)]);
        assert_eq!(skewed.diff(&inner).min_max(), MinMax::new(11, 12));
        assert!(!skewed.diff(&inner).is_uniform());
        assert_eq!(skewed.diff(&inner).value(), None);

        let partial = tile(size, &[(0, 0, 15)]);
        let d = partial.diff(&inner);
        assert_eq!(d.mismatched(), 2);
        assert!(!d.is_uniform());

        let empty = TileGrid::new(size);
        assert!(empty.diff(&empty).is_uniform());
        assert_eq!(empty.diff(&empty).value(), None);
    }

    #[test]
    fn partition_open_field() {
        let grid = Grid::open(3, 3);
        let start = Point::new(1, 1);
        let mut solver = Solver::for_tiles(&grid, start, 1);
        solver.run(&GardenPather::new(&grid));
        let field = solver.into_field();

        let tiles = TileSet::from_field(&field, grid.size(), 1);
        assert_eq!(tiles.extra(), 1);
        assert_eq!(tiles.tile_size(), Point::new(3, 3));
        assert_eq!(tiles.indices().count(), 9);
        assert_eq!(tiles.reached(), 81);
        let left = tiles.get(Point::new(-1, 0)).unwrap();
        // Global (-3, 1) is local (0, 1) of tile (-1, 0).
        assert_eq!(left.get(Point::new(0, 1)), 4);
        assert_eq!(left.min_max(), MinMax::new(2, 5));
        assert!(tiles.get(Point::new(2, 0)).is_none());
        assert_eq!(tiles.on_edge(Point::new(-1, 0)), (true, false));
        assert_eq!(tiles.on_edge(Point::new(1, -1)), (true, true));
        assert_eq!(tiles.on_edge(Point::ZERO), (false, false));
    }
}
