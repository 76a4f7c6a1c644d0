//! Row-major 2D array used for tile grids, lattices and height fields

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Dense 2D array in row-major order (`[row * cols + col]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(row, col)` for every cell in row-major order
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
            }
        }
        Self { rows, cols, data }
    }

    /// Wrap row-major data. Returns `None` if the length does not match.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == rows * cols).then_some(Self { rows, cols, data })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell at `(row, col)`, or `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// One full row
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// One full column, top to bottom
    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> + '_ {
        self.data.iter().skip(col).step_by(self.cols.max(1))
    }

    /// Underlying row-major storage
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Apply `f` to every cell, keeping the shape
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Grid with every cell set to `value`
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_layout() {
        let grid = Grid::from_fn(2, 3, |r, c| r * 10 + c);
        assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(grid[(1, 2)], 12);
        assert_eq!(grid.row(1), &[10, 11, 12]);
        assert_eq!(grid.column(1).copied().collect::<Vec<_>>(), vec![1, 11]);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_from_vec_checks_len() {
        assert!(Grid::from_vec(2, 2, vec![0; 3]).is_none());
        assert_eq!(Grid::from_vec(1, 2, vec![5, 6]).unwrap().shape(), (1, 2));
    }
}
