//! Read-only 2-D view over an array buffer

use std::ops::Index;

use crate::error::UsageError;
use crate::tag::Element;

use super::Array;

/// Row-major matrix view borrowed from a 2-dimensional [`Array`].
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T: Element> {
    data: &'a [T],
    rows: usize,
    cols: usize,
}

impl<'a, T: Element> MatrixView<'a, T> {
    pub(crate) fn new(array: &'a Array<T>) -> Result<Self, UsageError> {
        let &[rows, cols] = array.shape() else {
            return Err(UsageError::NotAMatrix {
                dimension: array.dimension(),
            });
        };
        if array.size() != rows * cols {
            return Err(UsageError::ShapeMismatch {
                expected: rows * cols,
                actual: array.size(),
            });
        }
        Ok(Self {
            data: array.data(),
            rows,
            cols,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at `(row, col)`, `None` when outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<&'a T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// One row as a contiguous slice
    pub fn row(&self, row: usize) -> Option<&'a [T]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate rows top to bottom
    pub fn row_iter(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        let cols = self.cols.max(1);
        self.data.chunks(cols).take(self.rows)
    }
}

impl<T: Element> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}
