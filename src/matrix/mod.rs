mod seed;

pub use seed::{Entropy, FixedSeed, OsEntropy, SeedSource};

use std::fmt::{self, Display};

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{MlErr, Result};

/// A dense, row-major grid of `f64` cells.
///
/// Indexing through `at`/`at_mut` is 1-based: rows live in `1..=rows` and columns in
/// `1..=cols`. A `Matrix` is never empty and owns its storage exclusively, so operations
/// producing a result (`dot`, `clone`) always allocate a fresh one, while the in-place ones
/// (`assign`, `scale`, `add`, `sub`, `random_fill`) only ever touch `self`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    cells: Array2<f64>,
}

impl Matrix {
    /// Creates a new zero filled `Matrix`.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows, at least 1.
    /// * `cols` - The amount of columns, at least 1.
    ///
    /// # Returns
    /// The new matrix, `MlErr::ZeroDimension` if any of the dimensions is 0 or
    /// `MlErr::DimensionOverflow` if `rows * cols` cells can't be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MlErr::ZeroDimension { rows, cols });
        }

        let bytes = rows
            .checked_mul(cols)
            .and_then(|cells| cells.checked_mul(size_of::<f64>()));
        if !bytes.is_some_and(|b| b <= isize::MAX as usize) {
            return Err(MlErr::DimensionOverflow { rows, cols });
        }

        Ok(Self {
            cells: Array2::zeros((rows, cols)),
        })
    }

    /// Creates a new `Matrix` holding a copy of `values`.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows, at least 1.
    /// * `cols` - The amount of columns, at least 1.
    /// * `values` - Exactly `rows * cols` values in row-major order.
    pub fn from_row_major(rows: usize, cols: usize, values: &[f64]) -> Result<Self> {
        let mut matrix = Self::new(rows, cols)?;
        matrix.assign(values)?;
        Ok(matrix)
    }

    /// Creates a new `Matrix` with every cell drawn uniformly from `[0, 1)`.
    ///
    /// # Arguments
    /// * `rows` - The amount of rows, at least 1.
    /// * `cols` - The amount of columns, at least 1.
    /// * `seeds` - Where the generator's seed is taken from.
    pub fn random<S>(rows: usize, cols: usize, seeds: &mut S) -> Result<Self>
    where
        S: SeedSource + ?Sized,
    {
        let mut matrix = Self::new(rows, cols)?;
        matrix.random_fill(seeds)?;
        Ok(matrix)
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Returns the `(rows, cols)` pair.
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Returns the value at `(row, col)`, both 1-based.
    ///
    /// # Returns
    /// The value or `MlErr::OutOfBounds` if the position lies outside the matrix.
    pub fn at(&self, row: usize, col: usize) -> Result<f64> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Returns a mutable reference to the cell at `(row, col)`, both 1-based.
    ///
    /// # Returns
    /// The reference or `MlErr::OutOfBounds` if the position lies outside the matrix.
    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let idx = self.index(row, col)?;
        Ok(&mut self.cells[idx])
    }

    /// Overwrites every cell with `values`, read in row-major order.
    ///
    /// # Returns
    /// `MlErr::SizeMismatch` if `values` doesn't hold exactly `rows * cols` elements, in
    /// which case the matrix is left untouched.
    pub fn assign(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.cells.len() {
            return Err(MlErr::SizeMismatch {
                a: "values",
                b: "matrix cells",
                got: values.len(),
                expected: self.cells.len(),
            });
        }

        self.cells
            .iter_mut()
            .zip(values)
            .for_each(|(cell, &v)| *cell = v);

        Ok(())
    }

    /// Computes the matrix product `self · other`.
    ///
    /// # Returns
    /// A new `self.rows() x other.cols()` matrix or `MlErr::ShapeMismatch` if
    /// `self.cols() != other.rows()`.
    pub fn dot(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols() != other.rows() {
            return Err(self.mismatch("matrix multiplication", other));
        }

        Ok(Self {
            cells: self.cells.dot(&other.cells),
        })
    }

    /// Multiplies every cell by `k`.
    pub fn scale(&mut self, k: f64) {
        self.cells.mapv_inplace(|c| c * k);
    }

    /// Adds `other` to `self` elementwise.
    ///
    /// # Returns
    /// `MlErr::ShapeMismatch` if the shapes differ.
    pub fn add(&mut self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(self.mismatch("addition", other));
        }

        self.cells += &other.cells;
        Ok(())
    }

    /// Subtracts `other` from `self` elementwise.
    ///
    /// # Returns
    /// `MlErr::ShapeMismatch` if the shapes differ.
    pub fn sub(&mut self, other: &Matrix) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(self.mismatch("subtraction", other));
        }

        self.cells -= &other.cells;
        Ok(())
    }

    /// Fills every cell with an independent uniform draw in `[0, 1)`.
    ///
    /// A fresh seed is taken from `seeds` on every call.
    ///
    /// # Returns
    /// The seed source's error if no seed could be obtained, the matrix is left
    /// untouched in that case.
    pub fn random_fill<S>(&mut self, seeds: &mut S) -> Result<()>
    where
        S: SeedSource + ?Sized,
    {
        let mut rng = StdRng::seed_from_u64(seeds.seed()?);
        self.cells.mapv_inplace(|_| rng.random::<f64>());
        Ok(())
    }

    /// Applies `f` to every cell.
    pub fn map_inplace<F>(&mut self, f: F)
    where
        F: FnMut(f64) -> f64,
    {
        self.cells.mapv_inplace(f);
    }

    /// Iterates over the cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.cells.iter()
    }

    fn index(&self, row: usize, col: usize) -> Result<(usize, usize)> {
        let (rows, cols) = self.shape();
        if !(1..=rows).contains(&row) || !(1..=cols).contains(&col) {
            return Err(MlErr::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }

        Ok((row - 1, col - 1))
    }

    fn mismatch(&self, op: &'static str, other: &Matrix) -> MlErr {
        MlErr::ShapeMismatch {
            op,
            lhs: self.shape(),
            rhs: other.shape(),
        }
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[")?;
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "  {cell:.6}  ")?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}
