//! The [`Grid`] type: an immutable garden tile repeated over the whole plane.
//!
//! A `Grid` stores one `width × height` tile. Every lookup goes through
//! [`Point::wrap`], so any point of the infinite plane resolves to a cell of
//! the base tile. [`Garden`] pairs a grid with the start plot parsed from
//! the `S` marker.

use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An immutable, periodic 2D tile of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl Grid {
    /// A grid with no rocks at all.
    pub fn open(width: i32, height: i32) -> Self {
        Self::from_fn(width, height, |_| Cell::Passable)
    }

    /// Build a grid by asking `f` for every local coordinate, row by row.
    ///
    /// Dimensions are clamped to at least one cell.
    pub fn from_fn(width: i32, height: i32, f: impl Fn(Point) -> Cell) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let cells = Range::new(0, 0, width, height).iter().map(f).collect();
        Self {
            cells,
            width,
            height,
        }
    }

    /// Width of the tile.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the tile.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size of the tile as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// The base tile `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Read the cell at a local coordinate. Returns `None` outside the base
    /// tile.
    pub fn at(&self, local: Point) -> Option<Cell> {
        if !self.bounds().contains(local) {
            return None;
        }
        Some(self.cells[(local.y * self.width + local.x) as usize])
    }

    /// Read the cell at any point of the plane.
    #[inline]
    pub fn cell(&self, p: Point) -> Cell {
        let l = p.wrap(self.size());
        self.cells[(l.y * self.width + l.x) as usize]
    }

    /// Whether the cell at any point of the plane can be walked on.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.cell(p).is_passable()
    }

    /// Plot and rock statistics of the base tile.
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for p in self.bounds() {
            let even = (p.x + p.y) % 2 == 0;
            match self.cell(p) {
                Cell::Passable if even => {
                    census.plots += 1;
                    census.even_plots += 1;
                }
                Cell::Passable => {
                    census.plots += 1;
                    census.odd_plots += 1;
                }
                Cell::Blocked => census.rocks += 1,
            }
        }
        census
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width as usize).enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            for c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Census
// ---------------------------------------------------------------------------

/// Cell counts of a tile.
///
/// `even_plots` and `odd_plots` split the plots by checkerboard colour
/// (`x + y` even or odd). After an even number of steps only cells of the
/// start's colour can be occupied, so these bound what one tile can
/// contribute to a count.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Census {
    pub plots: usize,
    pub rocks: usize,
    pub even_plots: usize,
    pub odd_plots: usize,
}

impl Census {
    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.plots + self.rocks
    }
}

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

/// A parsed garden: the repeating tile plus the start plot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Garden {
    pub grid: Grid,
    pub start: Point,
}

impl Garden {
    /// Pair a grid with a start point (local coordinates of the base tile).
    pub fn new(grid: Grid, start: Point) -> Self {
        Self { grid, start }
    }

    /// Parse a garden from text.
    ///
    /// Rows are separated by newlines (`\r\n` accepted) and must all have the
    /// same width. Leading/trailing whitespace is trimmed from the whole
    /// string but not from individual rows. Exactly one `S` must appear.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let s = s.trim();
        let mut cells = Vec::with_capacity(s.len());
        let mut width: Option<usize> = None;
        let mut start: Option<Point> = None;
        let mut height = 0usize;

        for (y, line) in s.lines().enumerate() {
            let mut row_width = 0usize;
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let Some(cell) = Cell::from_char(ch) else {
                    return Err(GridError::InvalidChar { ch, pos });
                };
                if ch == Cell::START_CHAR {
                    if let Some(first) = start {
                        return Err(GridError::DuplicateStart { first, second: pos });
                    }
                    start = Some(pos);
                }
                cells.push(cell);
                row_width += 1;
            }
            match width {
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(GridError::InconsistentWidth {
                        row: y,
                        expected,
                        found: row_width,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = match width {
            Some(w) if w > 0 => w,
            _ => return Err(GridError::Empty),
        };
        let start = start.ok_or(GridError::MissingStart)?;
        Ok(Self {
            grid: Grid {
                cells,
                width: width as i32,
                height: height as i32,
            },
            start,
        })
    }
}

impl FromStr for Garden {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Garden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..self.grid.width {
                let p = Point::new(x, y);
                if p == self.start {
                    write!(f, "{}", Cell::START_CHAR)?;
                } else {
                    write!(f, "{}", self.grid.cell(p))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
...........
";

    #[test]
    fn parse_sample() {
        let g = Garden::parse(SAMPLE).unwrap();
        assert_eq!(g.grid.size(), Point::new(11, 11));
        assert_eq!(g.start, Point::new(5, 5));
        assert!(g.grid.is_passable(g.start));
        assert_eq!(g.to_string(), SAMPLE.trim());
    }

    #[test]
    fn periodic_lookup() {
        let g = Garden::parse(SAMPLE).unwrap().grid;
        assert_eq!(g.cell(Point::new(5, 1)), Cell::Blocked);
        assert_eq!(g.cell(Point::new(5 + 11, 1 - 22)), Cell::Blocked);
        assert_eq!(g.cell(Point::new(-6, -10)), Cell::Blocked);
        assert_eq!(g.cell(Point::new(-11, -11)), Cell::Passable);
        assert_eq!(g.at(Point::new(-1, 0)), None);
        assert_eq!(g.at(Point::new(5, 1)), Some(Cell::Blocked));
    }

    #[test]
    fn crlf_and_surrounding_blank_lines() {
        let g: Garden = "\r\n..#\r\n.S.\r\n...\r\n\r\n".parse().unwrap();
        assert_eq!(g.grid.size(), Point::new(3, 3));
        assert_eq!(g.start, Point::new(1, 1));
        assert_eq!(g.grid.cell(Point::new(2, 0)), Cell::Blocked);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Garden::parse(""), Err(GridError::Empty));
        assert_eq!(Garden::parse("  \n \n"), Err(GridError::Empty));
        assert_eq!(Garden::parse("...\n..."), Err(GridError::MissingStart));
        assert_eq!(
            Garden::parse("S..\n..S"),
            Err(GridError::DuplicateStart {
                first: Point::new(0, 0),
                second: Point::new(2, 1),
            })
        );
        assert_eq!(
            Garden::parse("S..\n....\n..."),
            Err(GridError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 4,
            })
        );
        assert_eq!(
            Garden::parse("S.\n.O"),
            Err(GridError::InvalidChar {
                ch: 'O',
                pos: Point::new(1, 1),
            })
        );
    }

    #[test]
    fn census_counts() {
        let g = Garden::parse(SAMPLE).unwrap().grid;
        let c = g.census();
        assert_eq!(c.cells(), 121);
        assert_eq!(c.plots, 81);
        assert_eq!(c.rocks, 40);
        assert_eq!(c.even_plots + c.odd_plots, c.plots);

        let open = Grid::open(5, 5).census();
        assert_eq!(open.even_plots, 13);
        assert_eq!(open.odd_plots, 12);
        assert_eq!(open.rocks, 0);
    }

    #[test]
    fn from_fn_layout() {
        let g = Grid::from_fn(3, 2, |p| {
            if p == Point::new(2, 1) {
                Cell::Blocked
            } else {
                Cell::Passable
            }
        });
        assert_eq!(g.to_string(), "...\n..#");
        assert_eq!(g.census().plots, 5);
    }
}
