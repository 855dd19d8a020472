//! Neighbor counting and the per-row transition kernel.
//!
//! Both functions index padded storage directly. The dead gutter ring makes
//! every interior lookup in bounds, so there are no edge branches.

use super::cell::Cell;
use super::generation::{GUTTER, Generation};
use super::rules::next_state;

/// Live cells in the 3x3 block around padded `(px, py)`, excluding the centre.
#[inline(always)]
pub fn count_alive_neighbors(cells: &[Cell], padded_width: usize, px: usize, py: usize) -> u8 {
    let centre = py * padded_width + px;
    let mut total = 0u8;
    for base in [centre - padded_width, centre, centre + padded_width] {
        for cell in &cells[base - 1..=base + 1] {
            total += cell.is_alive() as u8;
        }
    }
    total - cells[centre].is_alive() as u8
}

/// Compute the next state of logical row `y` into `dest`.
///
/// `dest` holds exactly that row's interior cells (`width` of them). Reads go
/// to `source` only.
#[inline]
pub fn advance_row(source: &Generation, y: usize, dest: &mut [Cell]) {
    debug_assert_eq!(dest.len(), source.width());
    let padded_width = source.padded_width();
    let py = y + GUTTER;
    let row_start = py * padded_width + GUTTER;
    let cells = source.cells();
    let current = &cells[row_start..row_start + dest.len()];

    for (x, (out, now)) in dest.iter_mut().zip(current).enumerate() {
        let n = count_alive_neighbors(cells, padded_width, x + GUTTER, py);
        out.set_alive(next_state(now.is_alive(), n));
    }
}

#[cfg(test)]
mod tests {
    use super::{advance_row, count_alive_neighbors};
    use crate::gutterlife::Generation;

    #[test]
    fn counts_ignore_centre() {
        let mut generation = Generation::new(3, 3);
        generation.set(1, 1, true);
        let pw = generation.padded_width();
        assert_eq!(count_alive_neighbors(generation.cells(), pw, 2, 2), 0);
        assert_eq!(count_alive_neighbors(generation.cells(), pw, 1, 1), 1);
        assert_eq!(count_alive_neighbors(generation.cells(), pw, 3, 3), 1);
    }

    #[test]
    fn edge_cells_see_dead_gutter() {
        let generation = Generation::random_seeded(4, 4, 1.0, 3);
        let pw = generation.padded_width();
        assert_eq!(count_alive_neighbors(generation.cells(), pw, 1, 1), 3);
        assert_eq!(count_alive_neighbors(generation.cells(), pw, 2, 1), 5);
        assert_eq!(count_alive_neighbors(generation.cells(), pw, 4, 4), 3);
    }

    #[test]
    fn advance_row_writes_only_the_given_slice() {
        let mut generation = Generation::new(5, 5);
        for x in 1..4 {
            generation.set(x, 2, true);
        }
        let mut dest = generation.row(1).map(<[_]>::to_vec).unwrap_or_default();
        advance_row(&generation, 1, &mut dest);
        let alive: Vec<bool> = dest.iter().map(|c| c.is_alive()).collect();
        assert_eq!(alive, vec![false, false, true, false, false]);
        assert_eq!(dest[2].x(), 3);
        assert_eq!(dest[2].y(), 2);
    }
}
