//! Deciding whether the window is large enough to extrapolate from.
//!
//! Once the search has gone far enough, every tile beyond the first few
//! rings is reached through the tile next to it, and its distances are
//! that neighbor's plus a constant: the section diff. The classifier
//! compares the outermost ring with the ring just inside it and only
//! accepts the window when that constant is the same everywhere.

use std::fmt;

use tessel_core::{MinMax, Point};

use crate::error::Error;
use crate::tiles::{DiffGrid, TileSet};

/// One of the four sides of the tile block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The `(outer, inner)` tile indices compared on this side, `depth`
    /// rings in from the edge, in row or column `lane`.
    pub fn pair(self, extra: i32, depth: i32, lane: i32) -> (Point, Point) {
        let o = extra - depth;
        match self {
            Direction::Left => (Point::new(-o, lane), Point::new(-o + 1, lane)),
            Direction::Right => (Point::new(o, lane), Point::new(o - 1, lane)),
            Direction::Up => (Point::new(lane, -o), Point::new(lane, -o + 1)),
            Direction::Down => (Point::new(lane, o), Point::new(lane, o - 1)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// Per-axis distance offset between adjacent tiles at the window edge.
///
/// An axis is `None` when nothing beyond the base tile is reachable along
/// it; such an axis never contributes extra tiles.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SectionDiff {
    pub horizontal: Option<i64>,
    pub vertical: Option<i64>,
}

impl SectionDiff {
    /// The offset both axes agree on, ignoring an axis without one.
    pub fn scalar(self) -> Option<i64> {
        match (self.horizontal, self.vertical) {
            (Some(h), Some(v)) if h == v => Some(h),
            (Some(_), Some(_)) => None,
            (h, v) => h.or(v),
        }
    }
}

impl fmt::Display for SectionDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |d: Option<i64>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
        write!(f, "({}, {})", show(self.horizontal), show(self.vertical))
    }
}

/// Diffs of every `(outer, inner)` pair along one side.
///
/// `layers[depth][lane + extra]` compares the tile `depth` rings in from
/// the edge with its inward neighbor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeDiffs {
    pub direction: Direction,
    pub extra: i32,
    pub layers: Vec<Vec<DiffGrid>>,
}

impl EdgeDiffs {
    /// Outer tile index of `lane` (position in a layer) at `depth`.
    pub fn outer(&self, depth: usize, lane: usize) -> Point {
        self.direction
            .pair(self.extra, depth as i32, lane as i32 - self.extra)
            .0
    }

    /// The common diff of the outermost ring, or the outer tiles that
    /// break it.
    fn outer_value(&self) -> Result<Option<i64>, Vec<Point>> {
        let Some(layer) = self.layers.first() else {
            return Ok(None);
        };
        let mut values = MinMax::EMPTY;
        let mut broken = Vec::new();
        for (lane, diff) in layer.iter().enumerate() {
            if !diff.is_uniform() {
                broken.push(self.outer(0, lane));
            } else if let Some(v) = diff.value() {
                values.include(v);
            }
        }
        if values.count() > 1 {
            broken.extend((0..layer.len()).map(|lane| self.outer(0, lane)));
            broken.sort();
            broken.dedup();
        }
        if broken.is_empty() {
            Ok((!values.is_empty()).then_some(values.min))
        } else {
            Err(broken)
        }
    }
}

/// Result of a successful classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub extra: i32,
    pub section_diff: SectionDiff,
    pub edge_diffs: Vec<EdgeDiffs>,
}

impl Classification {
    pub fn edge(&self, direction: Direction) -> Option<&EdgeDiffs> {
        self.edge_diffs.iter().find(|e| e.direction == direction)
    }
}

/// Compares neighboring tiles of a [`TileSet`].
pub struct TileClassifier<'a> {
    tiles: &'a TileSet,
}

impl<'a> TileClassifier<'a> {
    pub fn new(tiles: &'a TileSet) -> Self {
        Self { tiles }
    }

    /// Diffs for every depth from the edge down to the ring next to the
    /// base tile.
    pub fn edge_diffs(&self, direction: Direction) -> EdgeDiffs {
        let extra = self.tiles.extra();
        let layers: Vec<Vec<DiffGrid>> = (0..extra)
            .map(|depth| {
                (-extra..=extra)
                    .filter_map(|lane| {
                        let (outer, inner) = direction.pair(extra, depth, lane);
                        let a = self.tiles.get(outer)?;
                        let b = self.tiles.get(inner)?;
                        Some(a.diff(b))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        EdgeDiffs {
            direction,
            extra,
            layers,
        }
    }

    /// Check that the outermost ring differs from the next one by a single
    /// positive constant per axis, with opposite sides agreeing.
    pub fn classify(&self) -> Result<Classification, Error> {
        let extra = self.tiles.extra();
        let non_uniform = |sections: Vec<Point>| Error::NonUniformPeriodicity {
            extra: extra.max(0) as u32,
            sections,
        };
        if extra < 1 {
            return Err(non_uniform(Vec::new()));
        }

        let edge_diffs: Vec<EdgeDiffs> = Direction::ALL
            .iter()
            .map(|&d| self.edge_diffs(d))
            .collect();

        let mut broken = Vec::new();
        let mut values = [None; 4];
        for (value, edge) in values.iter_mut().zip(&edge_diffs) {
            match edge.outer_value() {
                Ok(v) => *value = v,
                Err(sections) => {
                    log::debug!("{} edge is not uniform at {} tiles", edge.direction, sections.len());
                    broken.extend(sections);
                }
            }
        }
        if !broken.is_empty() {
            return Err(non_uniform(broken));
        }

        let [left, right, up, down] = values;
        let mut disagree = Vec::new();
        if left != right || left.is_some_and(|d| d <= 0) {
            disagree.extend([Point::new(-extra, 0), Point::new(extra, 0)]);
        }
        if up != down || up.is_some_and(|d| d <= 0) {
            disagree.extend([Point::new(0, -extra), Point::new(0, extra)]);
        }
        if !disagree.is_empty() {
            log::debug!("edge diffs disagree: left {left:?} right {right:?} up {up:?} down {down:?}");
            return Err(non_uniform(disagree));
        }

        let section_diff = SectionDiff {
            horizontal: left,
            vertical: up,
        };
        log::debug!("extra {extra}: section diff {section_diff}");
        Ok(Classification {
            extra,
            section_diff,
            edge_diffs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_core::{Garden, Grid};
    use crate::extrapolate::Extrapolator;
    use tessel_paths::{GardenPather, Solver};

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

    fn tiles(grid: &Grid, start: Point, extra: u32) -> TileSet {
        let mut s = Solver::for_tiles(grid, start, extra);
        s.run(&GardenPather::new(grid));
        TileSet::from_field(&s.into_field(), grid.size(), extra)
    }

    #[test]
    fn pairs_point_inward() {
        assert_eq!(
            Direction::Left.pair(3, 0, 1),
            (Point::new(-3, 1), Point::new(-2, 1))
        );
        assert_eq!(
            Direction::Right.pair(3, 1, -2),
            (Point::new(2, -2), Point::new(1, -2))
        );
        assert_eq!(
            Direction::Up.pair(2, 0, 0),
            (Point::new(0, -2), Point::new(0, -1))
        );
        assert_eq!(
            Direction::Down.pair(2, 1, 2),
            (Point::new(2, 1), Point::new(2, 0))
        );
    }

    #[test]
    fn open_grid_diff_is_tile_size() {
        let grid = Grid::open(5, 5);
        let ts = tiles(&grid, Point::new(2, 2), 2);
        let c = TileClassifier::new(&ts).classify().unwrap();
        assert_eq!(c.extra, 2);
        assert_eq!(c.section_diff, SectionDiff {
            horizontal: Some(5),
            vertical: Some(5),
        });
        assert_eq!(c.section_diff.scalar(), Some(5));
        let left = c.edge(Direction::Left).unwrap();
        assert_eq!(left.layers.len(), 2);
        assert_eq!(left.layers[0].len(), 5);
        assert_eq!(left.outer(0, 0), Point::new(-2, -2));
    }

    #[test]
    fn sample_needs_a_larger_window() {
        let g = Garden::parse(SAMPLE).unwrap();
        for extra in [1, 2, 3] {
            let ts = tiles(&g.grid, g.start, extra);
            match TileClassifier::new(&ts).classify() {
                Err(Error::NonUniformPeriodicity { extra: e, sections }) => {
                    assert_eq!(e, extra);
                    assert!(!sections.is_empty());
                    for s in sections {
                        assert!(s.x.abs() == extra as i32 || s.y.abs() == extra as i32);
                    }
                }
                other => panic!("extra {extra}: unexpected {other:?}"),
            }
        }
        let ts = tiles(&g.grid, g.start, 4);
        let c = TileClassifier::new(&ts).classify().unwrap();
        assert_eq!(c.section_diff.scalar(), Some(11));
    }

    #[test]
    fn classification_is_repeatable() {
        let g = Garden::parse(SAMPLE).unwrap();
        let ts = tiles(&g.grid, g.start, 5);
        let a = TileClassifier::new(&ts).classify().unwrap();
        let b = TileClassifier::new(&ts).classify().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.section_diff.scalar(), Some(11));

        // Both yield the same full/partial boundaries for every tile.
        let (xa, xb) = (Extrapolator::new(&ts, &a), Extrapolator::new(&ts, &b));
        for idx in ts.indices() {
            let (pa, pb) = (xa.profile(idx).unwrap(), xb.profile(idx).unwrap());
            for budget in [0, 64, 100, 1000, 26_501_365] {
                assert_eq!(pa.find_ns(budget, 11), pb.find_ns(budget, 11), "{idx} at {budget}");
            }
        }
        let edge = xa.profile(Point::new(5, 0)).unwrap();
        let (full_n, part_n) = edge.find_ns(1000, 11);
        assert!(0 <= full_n && full_n <= part_n);
        assert_eq!(xa.count(1000), xb.count(1000));
    }

    #[test]
    fn blocked_row_leaves_vertical_axis_empty() {
        // The walk cannot cross the rock row, so only the horizontal axis
        // has anything to compare.
        let grid = Grid::from_fn(3, 3, |p| {
            if p.y == 2 {
                tessel_core::Cell::Blocked
            } else {
                tessel_core::Cell::Passable
            }
        });
        let ts = tiles(&grid, Point::new(1, 1), 2);
        let c = TileClassifier::new(&ts).classify().unwrap();
        assert_eq!(c.section_diff, SectionDiff {
            horizontal: Some(3),
            vertical: None,
        });
        assert_eq!(c.section_diff.scalar(), Some(3));
    }

    #[test]
    fn zero_extra_cannot_be_classified() {
        let grid = Grid::open(3, 3);
        let ts = tiles(&grid, Point::new(1, 1), 0);
        assert_eq!(
            TileClassifier::new(&ts).classify().unwrap_err(),
            Error::NonUniformPeriodicity {
                extra: 0,
                sections: Vec::new(),
            }
        );
    }

    #[test]
    fn scalar_of_mixed_axes() {
        let d = SectionDiff {
            horizontal: Some(4),
            vertical: Some(6),
        };
        assert_eq!(d.scalar(), None);
        assert_eq!(SectionDiff::default().scalar(), None);
        assert_eq!(d.to_string(), "(4, 6)");
        assert_eq!(
            SectionDiff {
                horizontal: None,
                vertical: Some(2),
            }
            .to_string(),
            "(-, 2)"
        );
    }
}
