//! **tessel-core**: geometry primitives and the periodic garden grid.
//!
//! This crate provides the foundational types used across the *tessel*
//! workspace: points and half-open ranges on the integer plane, inclusive
//! [`MinMax`] spans, and the immutable [`Grid`] tile that repeats forever in
//! every direction.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;
pub mod minmax;

pub use cell::Cell;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Census, Garden, Grid};
pub use minmax::MinMax;
