//! Rule table for B3/S23.

/// Next state indexed by `[alive as usize][neighbors]`.
const RULE_TABLE: [[bool; 9]; 2] = build_table();

const fn build_table() -> [[bool; 9]; 2] {
    let mut table = [[false; 9]; 2];
    let mut n = 0;
    while n < 9 {
        table[0][n] = output_for(false, n as u8);
        table[1][n] = output_for(true, n as u8);
        n += 1;
    }
    table
}

const fn output_for(alive: bool, neighbors: u8) -> bool {
    if alive {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

/// Next liveness of a cell given its current state and live neighbor count.
///
/// `neighbors` is at most 8 for any cell of a padded grid.
#[inline(always)]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    debug_assert!(neighbors <= 8);
    RULE_TABLE[alive as usize][neighbors as usize]
}
