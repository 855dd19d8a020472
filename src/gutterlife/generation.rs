//! Padded grid storage for one generation.
//!
//! Cells live in a single row-major `Vec` sized `(width + 2) * (height + 2)`.
//! The outer ring ("gutter") is always dead, so every interior cell has eight
//! in-bounds neighbors and the kernel never branches on edges.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::cell::Cell;
use super::kernel;

/// Width of the dead border on each side of the logical grid.
pub const GUTTER: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },
}

/// One full snapshot of a bounded Life grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) cells: Vec<Cell>,
}

impl Generation {
    /// An all-dead grid of `width` x `height` logical cells.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Ok(generation) => generation,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(width: usize, height: usize) -> Result<Self, GenerationError> {
        if width == 0 || height == 0 {
            return Err(GenerationError::EmptyDimensions { width, height });
        }
        let padded_width = width + 2 * GUTTER;
        let padded_height = height + 2 * GUTTER;
        let cells = (0..padded_height)
            .flat_map(|y| (0..padded_width).map(move |x| Cell::new(x, y)))
            .collect();
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Independent copy of `other`; no storage is shared.
    pub fn copy_of(other: &Generation) -> Self {
        other.clone()
    }

    /// A grid whose interior cells are each alive with `probability`.
    pub fn random<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        probability: f64,
        rng: &mut R,
    ) -> Self {
        let mut generation = Self::new(width, height);
        generation.reseed_random(probability, rng);
        generation
    }

    /// Deterministic variant of [`Generation::random`] for demos and benches.
    pub fn random_seeded(width: usize, height: usize, probability: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::random(width, height, probability, &mut rng)
    }

    /// Overwrite every interior cell with a fresh random state.
    ///
    /// `probability` is clamped to `[0, 1]`; NaN counts as 0.
    pub fn reseed_random<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        let (width, height) = (self.width, self.height);
        for y in 0..height {
            let start = self.padded_index(GUTTER, y + GUTTER);
            for cell in &mut self.cells[start..start + width] {
                cell.set_alive(rng.random_bool(probability));
            }
        }
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline(always)]
    pub fn padded_width(&self) -> usize {
        self.width + 2 * GUTTER
    }

    #[inline(always)]
    pub fn padded_height(&self) -> usize {
        self.height + 2 * GUTTER
    }

    #[inline(always)]
    pub(super) fn padded_index(&self, px: usize, py: usize) -> usize {
        py * self.padded_width() + px
    }

    /// Every cell including the gutter ring, row-major in padded space.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Interior cells of logical row `y`, or `None` when `y` is out of range.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = self.padded_index(GUTTER, y + GUTTER);
        Some(&self.cells[start..start + self.width])
    }

    /// Bounds-checked lookup in logical coordinates.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.get_unchecked(x, y))
    }

    /// Lookup in logical coordinates without the logical range check.
    ///
    /// Callers guarantee `x < width` and `y < height`. Coordinates that fall
    /// inside the gutter return the gutter cell; anything past it panics.
    #[inline(always)]
    pub fn get_unchecked(&self, x: usize, y: usize) -> &Cell {
        debug_assert!(x < self.width && y < self.height);
        &self.cells[self.padded_index(x + GUTTER, y + GUTTER)]
    }

    /// Liveness at logical `(x, y)`; out-of-range reads as dead.
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::is_alive)
    }

    /// Set liveness at logical `(x, y)`. Returns `false` when out of range.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.padded_index(x + GUTTER, y + GUTTER);
        self.cells[idx].set_alive(alive);
        true
    }

    /// Flip liveness at logical `(x, y)`. Returns `false` when out of range.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = self.padded_index(x + GUTTER, y + GUTTER);
        self.cells[idx].toggle();
        true
    }

    /// Live neighbors of `cell` (0..=8), or `None` when its padded position
    /// is not an interior cell of this grid (gutter or out of range).
    ///
    /// The cell's padded coordinates index straight into storage; the gutter
    /// keeps all eight lookups in bounds.
    #[inline]
    pub fn count_alive_neighbors(&self, cell: &Cell) -> Option<u8> {
        let (px, py) = cell.position();
        if !(GUTTER..=self.width).contains(&px) || !(GUTTER..=self.height).contains(&py) {
            return None;
        }
        Some(kernel::count_alive_neighbors(
            &self.cells,
            self.padded_width(),
            px,
            py,
        ))
    }

    pub fn population(&self) -> u64 {
        (0..self.height)
            .filter_map(|y| self.row(y))
            .map(|row| row.iter().filter(|cell| cell.is_alive()).count() as u64)
            .sum()
    }

    /// Visit every live interior cell in row-major order with logical coordinates.
    pub fn for_each_live<F: FnMut(usize, usize)>(&self, mut f: F) {
        for y in 0..self.height {
            let Some(row) = self.row(y) else {
                break;
            };
            for (x, cell) in row.iter().enumerate() {
                if cell.is_alive() {
                    f(x, y);
                }
            }
        }
    }

    /// True when no cell in the gutter ring is alive.
    pub fn gutter_is_dead(&self) -> bool {
        let (pw, ph) = (self.padded_width(), self.padded_height());
        self.cells.iter().all(|cell| {
            let on_ring =
                cell.x() == 0 || cell.y() == 0 || cell.x() == pw - 1 || cell.y() == ph - 1;
            !(on_ring && cell.is_alive())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Generation, GenerationError};

    #[test]
    fn new_grid_is_padded_and_dead() {
        let generation = Generation::new(4, 3);
        assert_eq!(generation.cells().len(), 6 * 5);
        assert_eq!(generation.population(), 0);
        for (i, cell) in generation.cells().iter().enumerate() {
            assert_eq!(cell.y() * generation.padded_width() + cell.x(), i);
            assert!(!cell.is_alive());
        }
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Generation::try_new(0, 5),
            Err(GenerationError::EmptyDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(Generation::try_new(5, 0).is_err());
    }

    #[test]
    #[should_panic(expected = "non-zero")]
    fn new_panics_on_zero_dimension() {
        let _ = Generation::new(0, 0);
    }

    #[test]
    fn get_is_bounds_checked_in_logical_space() {
        let mut generation = Generation::new(3, 2);
        assert!(generation.set(2, 1, true));
        assert!(!generation.set(3, 1, false));
        assert!(generation.get(3, 0).is_none());
        assert!(generation.get(0, 2).is_none());

        let cell = generation.get(2, 1).copied();
        assert_eq!(cell.map(|c| (c.x(), c.y(), c.is_alive())), Some((3, 2, true)));
        assert_eq!(generation.get_unchecked(2, 1), &cell.unwrap());
        assert!(generation.gutter_is_dead());
    }

    #[test]
    fn copy_is_independent() {
        let mut original = Generation::new(5, 5);
        original.set(1, 1, true);
        let mut copy = Generation::copy_of(&original);
        copy.set(1, 1, false);
        copy.set(2, 2, true);
        assert!(original.is_alive(1, 1));
        assert!(!original.is_alive(2, 2));
    }

    #[test]
    fn reseed_only_touches_interior() {
        let full = Generation::random_seeded(7, 4, 1.0, 1);
        assert_eq!(full.population(), 28);
        assert!(full.gutter_is_dead());

        let empty = Generation::random_seeded(7, 4, f64::NAN, 1);
        assert_eq!(empty.population(), 0);
    }

    #[test]
    fn for_each_live_reports_logical_coordinates() {
        let mut generation = Generation::new(4, 4);
        generation.set(0, 0, true);
        generation.set(3, 2, true);
        let mut seen = Vec::new();
        generation.for_each_live(|x, y| seen.push((x, y)));
        assert_eq!(seen, vec![(0, 0), (3, 2)]);
    }

    #[test]
    fn neighbor_count_stays_within_eight() {
        let generation = Generation::random_seeded(6, 6, 1.0, 9);
        for y in 0..6 {
            for x in 0..6 {
                let n = generation.count_alive_neighbors(generation.get_unchecked(x, y));
                assert!(n.is_some_and(|n| n <= 8));
            }
        }
        let corner = generation.count_alive_neighbors(generation.get_unchecked(0, 0));
        assert_eq!(corner, Some(3));
        let centre = generation.count_alive_neighbors(generation.get_unchecked(2, 2));
        assert_eq!(centre, Some(8));
    }

    #[test]
    fn neighbor_count_rejects_gutter_cells() {
        let generation = Generation::random_seeded(3, 3, 1.0, 2);
        let pw = generation.padded_width();
        let last = generation.cells().len() - 1;
        for idx in [0, 1, pw - 1, pw, 2 * pw - 1, last] {
            let cell = &generation.cells()[idx];
            assert_eq!(
                generation.count_alive_neighbors(cell),
                None,
                "gutter cell {:?}",
                cell.position()
            );
        }
    }

    #[test]
    fn neighbor_count_rejects_cells_outside_this_grid() {
        let small = Generation::random_seeded(3, 3, 1.0, 4);
        let big = Generation::random_seeded(10, 10, 1.0, 4);
        for (x, y) in [(3, 0), (1, 3), (9, 9)] {
            let foreign = big.get(x, y).copied().expect("inside big grid");
            assert_eq!(small.count_alive_neighbors(&foreign), None, "({x},{y})");
        }
        let shared = big.get(1, 1).copied().expect("inside big grid");
        assert_eq!(small.count_alive_neighbors(&shared), Some(8));
    }

    #[test]
    fn toggle_flips_interior_cells_only() {
        let mut generation = Generation::new(4, 4);
        assert!(generation.toggle(1, 2));
        assert!(generation.is_alive(1, 2));
        assert!(generation.toggle(1, 2));
        assert!(!generation.is_alive(1, 2));
        assert!(!generation.toggle(4, 0));
        assert!(generation.gutter_is_dead());
    }
}
