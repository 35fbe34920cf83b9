//! Plain-text grid format.
//!
//! A grid file holds `n` lines of `n` ASCII digits. The width of the first
//! line fixes `n`. Marker grids are written the same way with `0`/`1` cells.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use crate::error::GridError;
use crate::grid::{Grid, MarkerGrid};

/// Parse a grid from its text form.
pub fn parse_grid(text: &str) -> Result<Grid, GridError> {
    let mut lines = text.lines().map(|line| line.strip_suffix('\r').unwrap_or(line));

    let first = lines.next().filter(|line| !line.is_empty()).ok_or(GridError::Empty)?;
    let n = first.chars().count();

    let mut cells = Vec::with_capacity(n * n);
    let mut row_count = 0;
    for (row, line) in std::iter::once(first).chain(lines).enumerate() {
        // A single trailing blank line is just the end of the file.
        if line.is_empty() && row == n {
            continue;
        }
        if row >= n {
            return Err(GridError::RowCount {
                expected: n,
                found: row + 1,
            });
        }

        let width = line.chars().count();
        if width != n {
            return Err(GridError::RaggedRow {
                row,
                expected: n,
                found: width,
            });
        }
        for (col, ch) in line.chars().enumerate() {
            let value = ch
                .to_digit(10)
                .ok_or(GridError::InvalidDigit { row, col, found: ch })?;
            cells.push(value as u8);
        }
        row_count += 1;
    }

    if row_count != n {
        return Err(GridError::RowCount {
            expected: n,
            found: row_count,
        });
    }

    Grid::from_cells(n, cells)
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grid(s)
    }
}

/// Read a grid file.
pub fn read_grid(path: impl AsRef<Path>) -> Result<Grid, GridError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| GridError::io(path, e))?;
    parse_grid(&text)
}

/// Write a grid file, replacing any existing contents.
pub fn write_grid(path: impl AsRef<Path>, grid: &Grid) -> Result<(), GridError> {
    write_text(path.as_ref(), grid)
}

/// Write a marker grid file, replacing any existing contents.
pub fn write_markers(path: impl AsRef<Path>, markers: &MarkerGrid) -> Result<(), GridError> {
    write_text(path.as_ref(), markers)
}

fn write_text(path: &Path, contents: &impl Display) -> Result<(), GridError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // New files are readable and writable by the owner only.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| GridError::io(path, e))?;
    write!(file, "{contents}").map_err(|e| GridError::io(path, e))?;
    file.flush().map_err(|e| GridError::io(path, e))
}
