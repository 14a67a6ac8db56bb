//! Conway's game of life on a bounded grid.
//!
//! [`Grid`] holds one generation and [`advance`] computes the next one from
//! it into a separate buffer. The remaining modules drive it from a terminal:
//! seeding, a ticking simulation thread and a viewer.

pub use utils::Pos;
mod utils;

pub use error::{ConfigError, GridError, SeedError};
pub mod error;

pub use grid::Grid;
mod grid;

pub use sim::{advance, advance_into, next_state, Sim, SimHandle, Snapshot};
pub mod sim;

pub use config::{Config, SeedSource};
pub mod config;

pub mod seed;

pub use view::View;
pub mod view;
