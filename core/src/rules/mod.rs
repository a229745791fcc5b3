//! Pure grid transformations applied by the engine on every move.
//!
//! Each function takes the grid explicitly and never mutates its input.

pub use gravity::*;
pub use region::*;
pub use terminal::*;

mod gravity;
mod region;
mod terminal;
