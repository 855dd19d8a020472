//! Text presentation of a generation.

use std::fmt;

use crate::gutterlife::Generation;

pub const ALIVE_GLYPH: char = '█';
pub const DEAD_GLYPH: char = '·';

/// Display character for a cell's liveness.
#[inline]
pub const fn glyph(alive: bool) -> char {
    if alive { ALIVE_GLYPH } else { DEAD_GLYPH }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height() {
            let Some(row) = self.row(y) else {
                break;
            };
            for cell in row {
                write!(f, "{}", glyph(cell.is_alive()))?;
            }
            if y + 1 < self.height() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
