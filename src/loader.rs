//! Plain-text grid import.
//!
//! Format: a size line `rows cols`, then exactly `rows` lines of `cols`
//! characters each. `'1'` is a live cell, any other character is dead.
//! Lines are trimmed and runs of whitespace collapse to a single space
//! before validation. Blank lines count as lines, so anything after the last
//! grid row is rejected.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::gutterlife::Generation;

/// Smallest accepted row or column count.
pub const MIN_SIZE: usize = 3;
/// Row and column counts must be strictly below this.
pub const MAX_SIZE: usize = 50;

const ALIVE: char = '1';

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("config is incorrect: expected a size line and at least one grid line")]
    TooFewLines,
    #[error("config is incorrect: size line must be two integers `rows cols`, got {0:?}")]
    InvalidSizeLine(String),
    #[error(
        "config is incorrect: size {rows}x{cols} outside [{min}, {max})",
        min = MIN_SIZE,
        max = MAX_SIZE
    )]
    SizeOutOfRange { rows: usize, cols: usize },
    #[error("config is incorrect: expected {expected} grid lines, found {actual}")]
    RowCountMismatch { expected: usize, actual: usize },
    #[error("config is incorrect: line {row} has {actual} cells, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Trim both ends and collapse interior whitespace runs to one space.
fn normalize(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_size_line(line: &str) -> Result<(usize, usize), ParseError> {
    let invalid = || ParseError::InvalidSizeLine(line.to_owned());
    let mut tokens = line.split(' ');
    let rows = tokens.next().ok_or_else(invalid)?;
    let cols = tokens.next().ok_or_else(invalid)?;
    if tokens.next().is_some() {
        return Err(invalid());
    }
    let rows: usize = rows.parse().map_err(|_| invalid())?;
    let cols: usize = cols.parse().map_err(|_| invalid())?;

    let in_range = |n: usize| (MIN_SIZE..MAX_SIZE).contains(&n);
    if !in_range(rows) || !in_range(cols) {
        return Err(ParseError::SizeOutOfRange { rows, cols });
    }
    Ok((rows, cols))
}

/// Parse a generation from text lines.
pub fn parse<I, S>(source: I) -> Result<Generation, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = source
        .into_iter()
        .map(|line| normalize(line.as_ref()))
        .collect();
    if lines.len() < 2 {
        return Err(ParseError::TooFewLines);
    }

    let (rows, cols) = parse_size_line(&lines[0])?;
    let grid = &lines[1..];
    if grid.len() != rows {
        return Err(ParseError::RowCountMismatch {
            expected: rows,
            actual: grid.len(),
        });
    }

    let mut generation = Generation::new(cols, rows);
    for (y, line) in grid.iter().enumerate() {
        let actual = line.chars().count();
        if actual != cols {
            return Err(ParseError::RowLengthMismatch {
                row: y + 2,
                expected: cols,
                actual,
            });
        }
        for (x, ch) in line.chars().enumerate() {
            if ch == ALIVE {
                generation.set(x, y, true);
            }
        }
    }

    debug!(
        rows,
        cols,
        population = generation.population(),
        "parsed grid config"
    );
    Ok(generation)
}

pub fn parse_str(source: &str) -> Result<Generation, ParseError> {
    parse(source.lines())
}

/// Read and parse a config file.
pub fn import(path: impl AsRef<Path>) -> Result<Generation, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_live_cells_and_treats_other_chars_as_dead() {
        let generation = parse_str("3 4\n1000\n0x10\n00.1").expect("valid config");
        assert_eq!((generation.width(), generation.height()), (4, 3));
        let mut live = Vec::new();
        generation.for_each_live(|x, y| live.push((x, y)));
        assert_eq!(live, vec![(0, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn size_line_whitespace_is_collapsed() {
        let generation = parse_str("   3 \t  3  \n111\n000\n111\n").expect("valid config");
        assert_eq!(generation.population(), 6);
    }

    #[test]
    fn rejects_bad_size_lines() {
        assert!(matches!(
            parse_str("a 3\n000\n000\n000"),
            Err(ParseError::InvalidSizeLine(_))
        ));
        assert!(matches!(
            parse_str("3\n000\n000\n000"),
            Err(ParseError::InvalidSizeLine(_))
        ));
        assert!(matches!(
            parse_str("3 3 3\n000\n000\n000"),
            Err(ParseError::InvalidSizeLine(_))
        ));
        assert!(matches!(
            parse_str("-3 3\n000\n000\n000"),
            Err(ParseError::InvalidSizeLine(_))
        ));
    }

    #[test]
    fn enforces_size_bounds() {
        assert!(matches!(
            parse_str("2 3\n000\n000"),
            Err(ParseError::SizeOutOfRange { rows: 2, cols: 3 })
        ));
        let wide = format!("3 50\n{0}\n{0}\n{0}", "0".repeat(50));
        assert!(matches!(
            parse_str(&wide),
            Err(ParseError::SizeOutOfRange { rows: 3, cols: 50 })
        ));
        let max = format!("3 49\n{0}\n{0}\n{0}", "1".repeat(49));
        assert_eq!(parse_str(&max).expect("49 columns fit").population(), 147);
    }

    #[test]
    fn rejects_wrong_row_count_and_length() {
        assert!(matches!(parse_str("5 5"), Err(ParseError::TooFewLines)));
        assert!(matches!(
            parse_str("5 5\n00000\n00000"),
            Err(ParseError::RowCountMismatch {
                expected: 5,
                actual: 2
            })
        ));
        assert!(matches!(
            parse_str("3 3\n000\n0000\n000"),
            Err(ParseError::RowLengthMismatch {
                row: 3,
                expected: 3,
                actual: 4
            })
        ));
        assert!(matches!(
            parse_str("3 3\n000\n000\n000\n000"),
            Err(ParseError::RowCountMismatch { .. })
        ));
    }

    #[test]
    fn trailing_blank_lines_are_extra_rows() {
        assert!(parse_str("3 3\n000\n000\n000\n").is_ok());
        assert!(matches!(
            parse_str("3 3\n000\n000\n000\n\n"),
            Err(ParseError::RowCountMismatch {
                expected: 3,
                actual: 4
            })
        ));
        assert!(matches!(
            parse_str("3 3\n000\n000\n000\n   \n\n"),
            Err(ParseError::RowCountMismatch {
                expected: 3,
                actual: 5
            })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = import("/nonexistent/gutter-life/config.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
