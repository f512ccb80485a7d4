//! Perfect maze generation by recursive backtracking.
//!
//! A [`WallGrid`] stores one wall mask per cell. Either backtracker carves a
//! spanning tree into it, in one go or one suspension point at a time, and
//! [`Session`] wraps the two behind the size threshold the driver uses.

pub mod generators;
pub mod grids;
pub mod random;
pub mod session;

pub use generators::{carve, Generator, GeneratorKind, Step};
pub use grids::{Direction, WallGrid};
pub use session::{Config, Session};
