//! Shortest-path search over a periodic garden.
//!
//! The garden tile repeats forever, so this crate searches a bounded
//! *window* of the plane instead:
//!
//! - [`PriorityQueue`]: an indexed binary min-heap over a node arena with
//!   `decrease_key`
//! - [`Solver`]: Dijkstra over a window, producing a [`DistanceField`]
//! - [`replay_count`]: the brute-force "where can I be after exactly *n*
//!   steps" simulation, used as an oracle
//!
//! Neighbour enumeration goes through the [`Pather`] trait; [`GardenPather`]
//! is the implementation for a [`tessel_core::Grid`].

mod distance;
mod field;
mod neighbors;
mod pather;
mod queue;
mod replay;
mod solver;
mod traits;

pub use distance::manhattan;
pub use field::{DistanceField, UNREACHABLE};
pub use neighbors::Neighbors;
pub use pather::GardenPather;
pub use queue::{NodeId, PriorityQueue, SearchNode};
pub use replay::replay_count;
pub use solver::Solver;
pub use traits::Pather;
