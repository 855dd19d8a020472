//! Padded-grid Life engine internals and public API.

mod cell;
mod engine;
mod generation;
mod kernel;
mod rules;

pub use cell::Cell;
pub use engine::{TransitionConfig, TransitionStrategy};
pub use generation::{GUTTER, Generation, GenerationError};
