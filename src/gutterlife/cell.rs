//! A single grid cell.

/// One cell of a [`Generation`](super::Generation), addressed in padded space.
///
/// Coordinates are fixed at construction; liveness is the only mutable state,
/// and only the owning generation changes it.
///
/// `Cell` equality and hashing are value equality over position *and*
/// liveness. Use [`Cell::position`] when only the cell's identity matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    x: usize,
    y: usize,
    alive: bool,
}

impl Cell {
    /// A dead cell at padded coordinates `(x, y)`.
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y, alive: false }
    }

    #[inline(always)]
    pub const fn x(&self) -> usize {
        self.x
    }

    #[inline(always)]
    pub const fn y(&self) -> usize {
        self.y
    }

    /// Padded `(x, y)`; the cell's identity within its grid.
    #[inline(always)]
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    #[inline(always)]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline(always)]
    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    #[inline]
    pub(crate) fn toggle(&mut self) {
        self.alive = !self.alive;
    }
}
