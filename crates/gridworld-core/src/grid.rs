use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

/// 0-based (row, column) cell address.
///
/// Used as the set key for terminal and wall classification; equality is
/// exact integer equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    Empty,
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::Empty => write!(f, "grid must have at least one row and one column"),
            GridError::RaggedRows {
                row,
                expected,
                actual,
            } => write!(
                f,
                "row {row} has {actual} columns, expected {expected} (grid must be rectangular)"
            ),
        }
    }
}

impl Error for GridError {}

/// Rectangular 2-D utility grid, stored row-major in a flat vector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<f64>,
}

impl Grid {
    /// Build a grid from nested rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, GridError> {
        let cols = rows.first().map(|r| r.len()).ok_or(GridError::Empty)?;
        if cols == 0 {
            return Err(GridError::Empty);
        }
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(GridError::RaggedRows {
                    row,
                    expected: cols,
                    actual: values.len(),
                });
            }
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// All-zero grid of the given shape.
    pub fn zeroed(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    pub fn get(&self, coord: Coord) -> f64 {
        self.cells[coord.row * self.cols + coord.col]
    }

    pub fn set(&mut self, coord: Coord, value: f64) {
        self.cells[coord.row * self.cols + coord.col] = value;
    }

    /// Iterate all cell addresses in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Coord::new(row, col)))
    }
}

/// Renders each row as `[` + comma-terminated `{:5.2}` values + `]`, then a
/// dash separator of length `cols * 6 + 2`.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            write!(f, "[")?;
            for col in 0..self.cols {
                write!(f, "{:5.2},", self.get(Coord::new(row, col)))?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "{}", "-".repeat(self.cols * 6 + 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Grid::from_rows(vec![vec![0.0, 0.0], vec![0.0]]).unwrap_err();
        assert_eq!(
            err,
            GridError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn from_rows_rejects_empty_input() {
        assert_eq!(Grid::from_rows(Vec::new()).unwrap_err(), GridError::Empty);
        assert_eq!(
            Grid::from_rows(vec![Vec::new()]).unwrap_err(),
            GridError::Empty
        );
    }

    #[test]
    fn get_set_round_trip() {
        let mut grid = Grid::zeroed(2, 3);
        grid.set(Coord::new(1, 2), -0.5);
        assert_eq!(grid.get(Coord::new(1, 2)), -0.5);
        assert_eq!(grid.get(Coord::new(0, 0)), 0.0);
    }

    #[test]
    fn display_matches_reference_layout() {
        let grid = Grid::zeroed(2, 4);
        let text = grid.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("[ 0.00, 0.00, 0.00, 0.00,]"));
        assert_eq!(lines.next(), Some("[ 0.00, 0.00, 0.00, 0.00,]"));
        let separator = lines.next().unwrap();
        assert!(separator.chars().all(|c| c == '-'));
        assert_eq!(separator.len(), 4 * 6 + 2);
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn display_right_aligns_negative_values() {
        let grid = Grid::from_rows(vec![vec![1.0, -1.0]]).unwrap();
        assert_eq!(grid.to_string().lines().next(), Some("[ 1.00,-1.00,]"));
    }
}
