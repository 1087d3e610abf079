use tessel_core::Garden;
use tessel_paths::{DistanceField, GardenPather, Solver, UNREACHABLE};

use crate::classify::{Classification, TileClassifier};
use crate::error::Error;
use crate::extrapolate::{Extrapolation, Extrapolator};
use crate::tiles::TileSet;

/// How a [`Walk`] count was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// The start has no passable neighbor, so no step can be taken.
    Stuck,
    /// Every walk within the budget stays inside the window; the window
    /// was counted cell by cell.
    Direct,
    /// Extrapolated from the window's edge tiles.
    Extrapolated(Extrapolation),
}

/// A count together with how it was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Walk {
    pub steps: u64,
    pub count: u64,
    /// Tile rings searched around the base tile (0 when no search ran).
    pub extra: u32,
    pub method: Method,
}

/// One search over a `(2 * extra + 1)²` tile window, reusable for any
/// number of step budgets.
#[derive(Debug, Clone)]
pub struct Survey {
    extra: u32,
    field: DistanceField,
    tiles: TileSet,
    classification: Option<Classification>,
    extrapolator: Option<Extrapolator>,
}

impl Survey {
    /// Run the search. The start is assumed to be passable.
    pub fn new(garden: &Garden, extra: u32) -> Self {
        let grid = &garden.grid;
        let mut solver = Solver::for_tiles(grid, garden.start, extra);
        solver.run(&GardenPather::new(grid));
        let field = solver.into_field();
        let tiles = TileSet::from_field(&field, grid.size(), extra);
        log::debug!(
            "extra {extra}: window {}, {} cells reached, border min {}",
            field.window(),
            field.reached(),
            field.border_min()
        );
        Self {
            extra,
            field,
            tiles,
            classification: None,
            extrapolator: None,
        }
    }

    #[inline]
    pub fn extra(&self) -> u32 {
        self.extra
    }

    #[inline]
    pub fn field(&self) -> &DistanceField {
        &self.field
    }

    #[inline]
    pub fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// The classification, once [`extrapolator`](Self::extrapolator) has
    /// succeeded.
    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    /// Whether `steps` can be answered without classifying the window.
    pub fn is_direct(&self, steps: u64) -> bool {
        let border = self.field.border_min();
        border == UNREACHABLE || steps < border as u64
    }

    /// Classify the window on first use and build the extrapolator.
    pub fn extrapolator(&mut self) -> Result<&Extrapolator, Error> {
        let x = match self.extrapolator.take() {
            Some(x) => x,
            None => {
                let c = TileClassifier::new(&self.tiles).classify()?;
                let x = Extrapolator::new(&self.tiles, &c);
                self.classification = Some(c);
                x
            }
        };
        Ok(self.extrapolator.insert(x))
    }

    /// Count the cells occupiable after exactly `steps` steps.
    pub fn count(&mut self, steps: u64) -> Result<Walk, Error> {
        let extra = self.extra;
        if self.is_direct(steps) {
            return Ok(Walk {
                steps,
                count: self.field.count_exact(steps),
                extra,
                method: Method::Direct,
            });
        }
        let e = self.extrapolator()?.count(steps)?;
        Ok(Walk {
            steps,
            count: e.total,
            extra,
            method: Method::Extrapolated(e),
        })
    }
}
