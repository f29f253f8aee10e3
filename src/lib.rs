//! **brickmaze** generates brick mazes: a bordered grid of `Empty`/`Filled` cells carved by a randomized
//! depth first walk with a two cell lookahead.
//!
//! ```
//! use brickmaze::maze::Maze;
//! use brickmaze::units::{Height, Width};
//!
//! let maze = Maze::from_seed(Width(14), Height(14), 7).unwrap();
//! println!("{}", maze.grid());
//! ```

#![recursion_limit = "1024"] // error_chain

#[macro_use]
extern crate error_chain;

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod layout;
pub mod maze;
pub mod pathing;
pub mod renderers;
pub mod units;

pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::maze::Maze;
