//! Bounded Conway's Game of Life (B3/S23) on a padded grid.
//!
//! A [`Generation`] stores its cells with a one-cell dead border so neighbor
//! counting never branches on edges. Transitions run either sequentially or
//! with one rayon task per row; [`Game`] drives them and keeps a reset
//! snapshot.

pub mod game;
pub mod gutterlife;
pub mod loader;
pub mod render;

pub use game::Game;
pub use gutterlife::{Cell, Generation, GenerationError, TransitionConfig, TransitionStrategy};
pub use loader::ParseError;
