use tessel_core::{Grid, Point, Range};

use crate::distance::manhattan;
use crate::field::{DistanceField, UNREACHABLE};
use crate::queue::{NodeId, PriorityQueue};
use crate::traits::Pather;

const NO_NODE: usize = usize::MAX;

/// Dijkstra search from one start point over a bounded window of the plane.
///
/// Every window cell gets at most one [`SearchNode`](crate::SearchNode);
/// a cheaper route to a queued node is applied with
/// [`PriorityQueue::decrease_key`], so the heap never holds stale entries.
pub struct Solver {
    window: Range,
    width: usize,
    start: Point,
    queue: PriorityQueue,
    node_at: Vec<usize>,
    cost_limit: i32,
    moves: u64,
    last: Option<NodeId>,
    nbuf: Vec<Point>,
}

impl Solver {
    /// Create a solver seeded with `start` at cost 0. A start outside the
    /// window leaves the queue empty.
    pub fn new(window: Range, start: Point) -> Self {
        let mut s = Self {
            window,
            width: window.width().max(0) as usize,
            start,
            queue: PriorityQueue::new(),
            node_at: vec![NO_NODE; window.len()],
            cost_limit: UNREACHABLE - 1,
            moves: 0,
            last: None,
            nbuf: Vec::with_capacity(4),
        };
        if let Some(i) = s.idx(start) {
            s.node_at[i] = s.queue.push(start, 0, None);
        }
        s
    }

    /// Solver over the `(2 * extra + 1)²` tile copies centred on the base
    /// tile of `grid`.
    pub fn for_tiles(grid: &Grid, start: Point, extra: u32) -> Self {
        Self::new(Range::tiled(grid.size(), extra as i32), start)
    }

    /// Never create nodes costing more than `limit`.
    pub fn with_cost_limit(mut self, limit: u64) -> Self {
        self.cost_limit = limit.min((UNREACHABLE - 1) as u64) as i32;
        self
    }

    #[inline]
    pub fn window(&self) -> Range {
        self.window
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Number of nodes popped so far.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// The most recently popped node.
    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        self.last
    }

    #[inline]
    pub fn queue(&self) -> &PriorityQueue {
        &self.queue
    }

    /// Pop the cheapest queued node and relax its neighbors. Returns the
    /// popped node, or `None` once the queue is exhausted.
    pub fn step<P: Pather>(&mut self, pather: &P) -> Option<NodeId> {
        let id = self.queue.pop_min()?;
        self.moves += 1;
        self.last = Some(id);

        let (cp, cost) = {
            let n = self.queue.node(id);
            (n.pos, n.cost)
        };
        debug_assert!(cost >= manhattan(self.start, cp));
        let next = cost + 1;
        if next > self.cost_limit {
            return Some(id);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        pather.neighbors(cp, &mut nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.idx(np) else {
                continue;
            };
            match self.node_at[ni] {
                NO_NODE => self.node_at[ni] = self.queue.push(np, next, Some(id)),
                existing => {
                    if !self.queue.node(existing).is_visited() {
                        self.queue.decrease_key(existing, next, Some(id));
                    }
                }
            }
        }

        self.nbuf = nbuf;
        Some(id)
    }

    /// Run until the queue is empty. Returns the number of moves made by
    /// this call.
    pub fn run<P: Pather>(&mut self, pather: &P) -> u64 {
        let before = self.moves;
        while self.step(pather).is_some() {
            if self.moves % 1_000_000 == 0 {
                log::trace!(
                    "after {} million moves: {} queued, window {}",
                    self.moves / 1_000_000,
                    self.queue.len(),
                    self.window
                );
            }
        }
        log::debug!(
            "solver finished after {} moves over window {} ({} nodes)",
            self.moves,
            self.window,
            self.queue.nodes().len()
        );
        self.moves - before
    }

    /// Best known cost at `p` (final once the node has been popped).
    pub fn cost_at(&self, p: Point) -> i32 {
        match self.idx(p).map(|i| self.node_at[i]) {
            Some(id) if id != NO_NODE => self.queue.node(id).cost,
            _ => UNREACHABLE,
        }
    }

    /// The route from the start to `p`, both ends included, following
    /// parent links. `None` if `p` has not been reached.
    pub fn path_to(&self, p: Point) -> Option<Vec<Point>> {
        let i = self.idx(p)?;
        let mut id = match self.node_at[i] {
            NO_NODE => return None,
            id => id,
        };
        let mut path = Vec::with_capacity(self.queue.node(id).cost as usize + 1);
        loop {
            let n = self.queue.node(id);
            path.push(n.pos);
            match n.parent {
                Some(parent) => id = parent,
                None => break,
            }
        }
        path.reverse();
        Some(path)
    }

    /// Snapshot the recorded costs.
    pub fn field(&self) -> DistanceField {
        let mut field = DistanceField::new(self.window);
        for n in self.queue.nodes() {
            field.set(n.pos, n.cost);
        }
        field
    }

    /// Consume the solver, keeping only the recorded costs.
    pub fn into_field(self) -> DistanceField {
        self.field()
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.window.contains(p) {
            return None;
        }
        let x = (p.x - self.window.min.x) as usize;
        let y = (p.y - self.window.min.y) as usize;
        Some(y * self.width + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pather::GardenPather;
    use tessel_core::Garden;

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

    #[test]
    fn open_grid_costs_are_manhattan() {
        let grid = Grid::open(5, 5);
        let start = Point::new(2, 2);
        let mut s = Solver::for_tiles(&grid, start, 1);
        s.run(&GardenPather::new(&grid));
        assert!(s.queue().is_empty());
        let field = s.field();
        assert_eq!(field.window(), Range::new(-5, -5, 10, 10));
        assert_eq!(field.reached(), 225);
        for p in field.window() {
            assert_eq!(field.get(p), manhattan(start, p), "at {p}");
        }
        assert_eq!(field.border_min(), 7);
        assert_eq!(s.moves(), 225);
    }

    #[test]
    fn path_follows_parents() {
        let garden = Garden::parse(SAMPLE).unwrap();
        let grid = &garden.grid;
        let mut s = Solver::for_tiles(grid, garden.start, 1);
        s.run(&GardenPather::new(grid));
        let target = Point::new(-3, 12);
        let path = s.path_to(target).unwrap();
        assert_eq!(path.first(), Some(&garden.start));
        assert_eq!(path.last(), Some(&target));
        assert_eq!(path.len() as i32, s.cost_at(target) + 1);
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
            assert!(grid.is_passable(w[1]));
        }
        assert_eq!(s.path_to(Point::new(5, 1)), None);
        assert_eq!(s.path_to(Point::new(500, 1)), None);
    }

    #[test]
    fn sample_costs_match_known_counts() {
        let garden = Garden::parse(SAMPLE).unwrap();
        let mut s = Solver::for_tiles(&garden.grid, garden.start, 2);
        s.run(&GardenPather::new(&garden.grid));
        let field = s.into_field();
        assert_eq!(field.count_exact(6), 16);
        assert_eq!(field.count_exact(10), 50);
        assert_eq!(field.border_min(), 32);
    }

    #[test]
    fn cost_limit_stops_expansion() {
        let grid = Grid::open(9, 9);
        let start = Point::new(4, 4);
        let mut s = Solver::for_tiles(&grid, start, 0).with_cost_limit(3);
        s.run(&GardenPather::new(&grid));
        let field = s.field();
        assert_eq!(field.max_cost(), Some(3));
        assert_eq!(field.reached(), 25);
        assert_eq!(s.cost_at(Point::new(4, 8)), UNREACHABLE);
        assert_eq!(s.cost_at(Point::new(4, 7)), 3);
    }

    #[test]
    fn start_outside_window_reaches_nothing() {
        let grid = Grid::open(3, 3);
        let mut s = Solver::new(grid.bounds(), Point::new(10, 10));
        assert!(s.queue().is_empty());
        assert_eq!(s.run(&GardenPather::new(&grid)), 0);
        assert_eq!(s.field().reached(), 0);
        assert_eq!(s.last(), None);
    }

    #[test]
    fn stepping_pops_in_cost_order() {
        let grid = Grid::open(4, 4);
        let pather = GardenPather::new(&grid);
        let mut s = Solver::for_tiles(&grid, Point::ZERO, 1);
        let mut prev = 0;
        while let Some(id) = s.step(&pather) {
            let cost = s.queue().node(id).cost;
            assert!(cost >= prev);
            prev = cost;
        }
        assert_eq!(s.last().map(|id| s.queue().node(id).cost), Some(prev));
    }
}
