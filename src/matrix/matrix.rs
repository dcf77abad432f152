use crate::error::{Error, Result};
use crate::matrix::element::Element;
use itertools::Itertools;
use num_traits::{One, Zero};
use std::fmt;
use std::ops;

/// Dense `rows x cols` matrix stored row-major in a single owned buffer.
///
/// The shape is fixed at construction and is never `0` in either direction.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<T>,
}

impl<T: Element> Matrix<T> {
    /// Zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Matrix<T>> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidShape { rows, cols });
        }
        Ok(Matrix {
            rows,
            cols,
            cells: (0..(rows * cols)).map(|_| T::zero()).collect(),
        })
    }

    /// Builds a matrix from its rows. Ragged input is rejected, not padded.
    pub fn from_list(lines: Vec<Vec<T>>) -> Result<Matrix<T>> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidShape { rows, cols });
        }
        if let Some(line) = lines.iter().find(|l| l.len() != cols) {
            return Err(Error::DimensionMismatch {
                left: (1, cols),
                right: (1, line.len()),
            });
        }

        Ok(Matrix {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    pub fn to_list(&self) -> Vec<Vec<T>> {
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    pub fn identity(n: usize) -> Result<Matrix<T>> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.cells[i * n + i] = T::one();
        }
        Ok(m)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self.at(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self.cells[row * self.cols + col] = value;
        Ok(())
    }

    /// Owned copy of a row; writing it back goes through `set_row`.
    pub fn row(&self, index: usize) -> Result<Vec<T>> {
        self.check_index(index, 0)?;
        Ok(self.cells[index * self.cols..(index + 1) * self.cols].to_vec())
    }

    pub fn col(&self, index: usize) -> Result<Vec<T>> {
        self.check_index(0, index)?;
        Ok((0..self.rows).map(|r| self.at(r, index)).collect())
    }

    pub fn set_row(&mut self, index: usize, values: Vec<T>) -> Result<()> {
        self.check_index(index, 0)?;
        if values.len() != self.cols {
            return Err(Error::DimensionMismatch {
                left: (1, self.cols),
                right: (1, values.len()),
            });
        }
        let start = index * self.cols;
        for (cell, value) in self.cells[start..start + self.cols].iter_mut().zip(values) {
            *cell = value;
        }
        Ok(())
    }

    pub fn add(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.cols || self.rows != rhs.rows {
            return Err(self.mismatch(rhs));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| a.clone() + b.clone())
                .collect(),
        })
    }

    pub fn product(&self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != rhs.rows {
            return Err(self.mismatch(rhs));
        }

        Ok(Matrix {
            rows: self.rows,
            cols: rhs.cols,
            cells: (0..self.rows)
                .flat_map(|i| {
                    (0..rhs.cols).map(move |j| {
                        (0..self.cols).fold(T::zero(), |acc, k| {
                            acc + self.at(i, k) * rhs.at(k, j)
                        })
                    })
                })
                .collect(),
        })
    }

    pub fn scalar(&self, k: &T) -> Matrix<T> {
        self.map(|x| x * k.clone())
    }

    pub fn transpose(&self) -> Matrix<T> {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    /// Element-wise conversion, e.g. from `i64` to `Rational`.
    pub fn map<U: Element>(&self, f: impl FnMut(T) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().cloned().map(f).collect(),
        }
    }

    #[inline(always)]
    pub(crate) fn at(&self, row: usize, col: usize) -> T {
        self.cells[row * self.cols + col].clone()
    }

    pub(crate) fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::IndexOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn mismatch(&self, rhs: &Matrix<T>) -> Error {
        Error::DimensionMismatch {
            left: self.shape(),
            right: rhs.shape(),
        }
    }
}

impl<T: Element> ops::Add<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn add(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        Matrix::add(self, rhs)
    }
}

impl<T: Element> ops::Mul<&Matrix<T>> for &Matrix<T> {
    type Output = Result<Matrix<T>>;

    fn mul(self, rhs: &Matrix<T>) -> Result<Matrix<T>> {
        self.product(rhs)
    }
}

/// One row per line: `[1 2 3]`.
impl<T: Element> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.cells.chunks(self.cols) {
            writeln!(f, "[{}]", line.iter().join(" "))?;
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
