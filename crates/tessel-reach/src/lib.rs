//! Exact reachability counts on an infinitely repeated garden.
//!
//! Given a garden tile that repeats over the whole plane and a start plot,
//! [`solve`] counts the plots a walker can stand on after exactly `N`
//! steps. `N` may be far larger than anything a search could cover: the
//! crate searches a window of `(2 * extra + 1)²` tile copies, checks that
//! the distances at the window's edge have settled into a fixed
//! tile-to-tile offset, and extrapolates the rest of the plane from there.
//!
//! ```
//! use tessel_core::{Garden, Grid, Point};
//! use tessel_reach::{solve, Options};
//!
//! let garden = Garden::new(Grid::open(5, 5), Point::new(2, 2));
//! assert_eq!(solve(&garden, 1000, &Options::default()).unwrap(), 1001 * 1001);
//! ```

mod classify;
mod error;
mod extrapolate;
mod growth;
mod options;
mod profile;
pub mod render;
mod survey;
mod tiles;

pub use classify::{Classification, Direction, EdgeDiffs, SectionDiff, TileClassifier};
pub use error::Error;
pub use extrapolate::{Extrapolation, Extrapolator};
pub use growth::{GrowthSeries, growth_series};
pub use options::Options;
pub use profile::TileProfile;
pub use survey::{Method, Survey, Walk};
pub use tiles::{DiffGrid, TileGrid, TileSet};

use tessel_core::Garden;
use tessel_paths::{GardenPather, Solver};

/// Number of plots occupiable after exactly `steps` steps on the infinite
/// plane.
pub fn solve(garden: &Garden, steps: u64, options: &Options) -> Result<u64, Error> {
    walk(garden, steps, options).map(|w| w.count)
}

/// Like [`solve`], also reporting the window used and how the count was
/// obtained.
pub fn walk(garden: &Garden, steps: u64, options: &Options) -> Result<Walk, Error> {
    settle(garden, steps, options).map(|(_, w)| w)
}

/// Count within the base tile only, as if the garden did not repeat.
pub fn count_bounded(garden: &Garden, steps: u64) -> Result<u64, Error> {
    check_start(garden)?;
    let grid = &garden.grid;
    let mut solver = Solver::new(grid.bounds(), garden.start).with_cost_limit(steps);
    solver.run(&GardenPather::new(grid));
    let field = solver.into_field();
    // A start walled in by rocks cannot take even one step.
    if steps > 0 && field.reached() <= 1 {
        return Ok(0);
    }
    Ok(field.count_exact(steps))
}

/// Find the smallest window, within `options`, that answers `steps`.
///
/// Returns `None` for the survey when the start cannot move at all.
pub(crate) fn settle(
    garden: &Garden,
    steps: u64,
    options: &Options,
) -> Result<(Option<Survey>, Walk), Error> {
    check_start(garden)?;
    if !GardenPather::new(&garden.grid).can_move(garden.start) {
        log::debug!("start {} has no passable neighbor", garden.start);
        let walk = Walk {
            steps,
            count: u64::from(steps == 0),
            extra: 0,
            method: Method::Stuck,
        };
        return Ok((None, walk));
    }

    let options = options.validated();
    let mut extra = options.initial_extra;
    loop {
        let mut survey = Survey::new(garden, extra);
        match survey.count(steps) {
            Ok(walk) => return Ok((Some(survey), walk)),
            Err(e @ Error::NonUniformPeriodicity { .. }) if extra < options.max_extra => {
                log::warn!("{e}; growing the window to extra = {}", extra + 1);
                extra += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// The start must be a plot of the base tile.
fn check_start(garden: &Garden) -> Result<(), Error> {
    let inside = garden.grid.bounds().contains(garden.start);
    if inside && garden.grid.is_passable(garden.start) {
        Ok(())
    } else {
        Err(Error::UnreachableStart(garden.start))
    }
}
