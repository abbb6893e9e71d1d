//! Dense, dynamically sized matrix of `f32` values.
//!
//! # Storage
//! Cells live in one contiguous buffer in **row-major** order. Every accessor
//! and every constructor goes through [`Matrix::index`], so the order a
//! matrix is filled in is the order it is read back in.
//!
//! # Inversion
//! [`Matrix::inverse`] uses Gauss–Jordan elimination on a working copy paired
//! with an identity accumulator. Singularity is not detected on the fly: the
//! reduced working copy must equal the identity at the end, otherwise the
//! inversion fails with [`DomainError::Singular`].
//!
//! # Example
//! ```ignore
//! let a = Matrix::from_values(2, 2, &[4.0, 7.0, 2.0, 6.0]);
//! let inv = a.inverse()?;
//! assert_eq!((&a * &inv)?, Matrix::identity(2));
//! ```

use std::fmt;
use std::ops::{Mul, MulAssign};

use approx::AbsDiffEq;
use thiserror::Error;

/// Default absolute tolerance for matrix equality.
pub const DEFAULT_TOLERANCE: f32 = 1e-5;

/// Cells smaller than this are snapped to zero after a scaled row addition.
const SNAP_THRESHOLD: f32 = 1e-5;

/// Precondition violations reported by [`Matrix`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("row {row} or column {col} out of domain for a {rows}x{cols} matrix")]
    OutOfDomain {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("cannot multiply a {lhs_rows}x{lhs_cols} matrix by a {rhs_rows}x{rhs_cols} matrix")]
    DimensionMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
    #[error("a {rows}x{cols} matrix is not square")]
    NotSquare { rows: usize, cols: usize },
    #[error("matrix is singular: no inverse")]
    Singular,
}

#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Creates a zero-filled `rows`x`cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix filled row-major from `values`.
    ///
    /// `values` should hold exactly `rows * cols` entries. Missing trailing
    /// entries are left at zero and surplus entries are ignored.
    pub fn from_values(rows: usize, cols: usize, values: &[f32]) -> Self {
        let mut matrix = Self::new(rows, cols);
        let n = matrix.data.len().min(values.len());
        matrix.data[..n].copy_from_slice(&values[..n]);
        matrix
    }

    /// Parses a matrix from a flat, row-major list of numbers.
    ///
    /// Any character that cannot be part of a number separates values
    /// (`"1,2;3 4"` holds four values). Parsing stops at the first malformed
    /// token; cells that were not reached stay zero.
    pub fn parse(rows: usize, cols: usize, text: &str) -> Self {
        let is_numeric = |c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E');
        let values: Vec<f32> = text
            .split(|c: char| !is_numeric(c))
            .filter(|token| !token.is_empty())
            .map_while(|token| token.parse().ok())
            .collect();
        Self::from_values(rows, cols, &values)
    }

    pub fn identity(size: usize) -> Self {
        let mut matrix = Self::new(size, size);
        for i in 0..size {
            let idx = matrix.index(i, i);
            matrix.data[idx] = 1.0;
        }
        matrix
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Flat offset of cell (r, c). The single source of truth for layout.
    #[inline]
    fn index(&self, r: usize, c: usize) -> usize {
        r * self.cols + c
    }

    #[inline]
    fn checked_index(&self, r: usize, c: usize) -> Result<usize, DomainError> {
        if r >= self.rows || c >= self.cols {
            return Err(DomainError::OutOfDomain {
                row: r,
                col: c,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.index(r, c))
    }

    /// Reads cell (r, c).
    pub fn get(&self, r: usize, c: usize) -> Result<f32, DomainError> {
        Ok(self.data[self.checked_index(r, c)?])
    }

    /// Writes cell (r, c).
    pub fn set(&mut self, r: usize, c: usize, value: f32) -> Result<(), DomainError> {
        let idx = self.checked_index(r, c)?;
        self.data[idx] = value;
        Ok(())
    }

    /// Mutable reference to cell (r, c), for in-place updates:
    ///
    /// ```ignore
    /// *m.get_mut(0, 1)? += 3.0;
    /// ```
    pub fn get_mut(&mut self, r: usize, c: usize) -> Result<&mut f32, DomainError> {
        let idx = self.checked_index(r, c)?;
        Ok(&mut self.data[idx])
    }

    /// Read-modify-write of cell (r, c) as one bounds-checked operation.
    ///
    /// ```ignore
    /// m.update(0, 1, |v| v + 3.0)?;
    /// ```
    pub fn update<F>(&mut self, r: usize, c: usize, f: F) -> Result<(), DomainError>
    where
        F: FnOnce(f32) -> f32,
    {
        let idx = self.checked_index(r, c)?;
        self.data[idx] = f(self.data[idx]);
        Ok(())
    }

    fn check_row(&self, r: usize) -> Result<(), DomainError> {
        // Column 0 does not exist in a zero-column matrix, so check the row alone.
        if r >= self.rows {
            return Err(DomainError::OutOfDomain {
                row: r,
                col: 0,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) -> Result<(), DomainError> {
        self.check_row(r1)?;
        self.check_row(r2)?;
        if r1 == r2 {
            return Ok(());
        }
        for c in 0..self.cols {
            let (a, b) = (self.index(r1, c), self.index(r2, c));
            self.data.swap(a, b);
        }
        Ok(())
    }

    pub fn scale_row(&mut self, r: usize, scale: f32) -> Result<(), DomainError> {
        self.check_row(r)?;
        for c in 0..self.cols {
            let idx = self.index(r, c);
            self.data[idx] *= scale;
        }
        Ok(())
    }

    /// Adds `scale` times row `from` to row `to`.
    ///
    /// Resulting cells with magnitude below `1e-5` are snapped to exactly zero
    /// so floating-point residue does not survive elimination.
    pub fn add_row_scaled(&mut self, from: usize, scale: f32, to: usize) -> Result<(), DomainError> {
        self.check_row(from)?;
        self.check_row(to)?;
        for c in 0..self.cols {
            let src = self.data[self.index(from, c)];
            let idx = self.index(to, c);
            let value = self.data[idx] + src * scale;
            self.data[idx] = if value.abs() < SNAP_THRESHOLD { 0.0 } else { value };
        }
        Ok(())
    }

    pub fn transpose(&self) -> Self {
        let mut t = Self::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                let (dst, src) = (t.index(c, r), self.index(r, c));
                t.data[dst] = self.data[src];
            }
        }
        t
    }

    /// Standard matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> Result<Matrix, DomainError> {
        if self.cols != rhs.rows {
            return Err(DomainError::DimensionMismatch {
                lhs_rows: self.rows,
                lhs_cols: self.cols,
                rhs_rows: rhs.rows,
                rhs_cols: rhs.cols,
            });
        }

        let mut product = Self::new(self.rows, rhs.cols);
        for r in 0..self.rows {
            for c in 0..rhs.cols {
                let sum: f32 = (0..self.cols)
                    .map(|k| self.data[self.index(r, k)] * rhs.data[rhs.index(k, c)])
                    .sum();
                let idx = product.index(r, c);
                product.data[idx] = sum;
            }
        }
        Ok(product)
    }

    /// Elementwise scale by `scalar`.
    pub fn scale(&self, scalar: f32) -> Matrix {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * scalar).collect(),
        }
    }

    /// True iff both matrices have the same shape and every pair of cells
    /// differs by at most `tolerance`.
    pub fn equals(&self, other: &Matrix, tolerance: f32) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tolerance)
    }

    /// Returns the first column in row `r` holding a nonzero value.
    fn leading_column(&self, r: usize) -> Option<usize> {
        (0..self.cols).find(|&c| self.data[self.index(r, c)] != 0.0)
    }

    /// Computes the inverse by Gauss–Jordan elimination.
    ///
    /// Every row operation is applied to a working copy `a` of `self` and to
    /// an accumulator `b` that starts as the identity. Columns without a
    /// pivot are skipped rather than treated as failure; whether the matrix
    /// was invertible is decided only by checking that `a` reduced to the
    /// identity.
    pub fn inverse(&self) -> Result<Matrix, DomainError> {
        if !self.is_square() {
            return Err(DomainError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }

        let size = self.rows;
        let mut a = self.clone();
        let mut b = Matrix::identity(size);

        // Forward pass: echelon form with unit pivots.
        let mut current_row = 0;
        for col in 0..size {
            if current_row >= size {
                break;
            }

            let Some(pivot_row) = (current_row..size).find(|&r| a.data[a.index(r, col)] != 0.0) else {
                continue;
            };
            a.swap_rows(pivot_row, current_row)?;
            b.swap_rows(pivot_row, current_row)?;

            let pivot = a.get(current_row, col)?;
            for r in (current_row + 1)..size {
                let entry = a.get(r, col)?;
                if entry != 0.0 {
                    let scale = -entry / pivot;
                    a.add_row_scaled(current_row, scale, r)?;
                    b.add_row_scaled(current_row, scale, r)?;
                }
            }

            a.scale_row(current_row, 1.0 / pivot)?;
            b.scale_row(current_row, 1.0 / pivot)?;
            current_row += 1;
        }

        // Backward pass: clear everything above each leading entry.
        for r in (0..size).rev() {
            let Some(lead_col) = a.leading_column(r) else {
                continue;
            };
            let lead = a.get(r, lead_col)?;
            for above in 0..r {
                let entry = a.get(above, lead_col)?;
                if entry != 0.0 {
                    let scale = -entry / lead;
                    a.add_row_scaled(r, scale, above)?;
                    b.add_row_scaled(r, scale, above)?;
                }
            }
        }

        if !a.equals(&Matrix::identity(size), DEFAULT_TOLERANCE) {
            return Err(DomainError::Singular);
        }
        Ok(b)
    }
}

/// Tolerance-based equality (see [`DEFAULT_TOLERANCE`]).
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other, DEFAULT_TOLERANCE)
    }
}

impl AbsDiffEq for Matrix {
    type Epsilon = f32;

    fn default_epsilon() -> Self::Epsilon {
        DEFAULT_TOLERANCE
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.equals(other, epsilon)
    }
}

impl Mul<&Matrix> for &Matrix {
    type Output = Result<Matrix, DomainError>;

    fn mul(self, rhs: &Matrix) -> Self::Output {
        self.multiply(rhs)
    }
}

impl Mul<Matrix> for Matrix {
    type Output = Result<Matrix, DomainError>;

    fn mul(self, rhs: Matrix) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Mul<f32> for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<f32> for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl MulAssign<f32> for Matrix {
    fn mul_assign(&mut self, rhs: f32) {
        self.data.iter_mut().for_each(|v| *v *= rhs);
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let sep = if c + 1 == self.cols { "," } else { ",\t" };
                write!(f, "{:.4}{}", self.data[self.index(r, c)], sep)?;
            }
            if r + 1 != self.rows {
                write!(f, "\n ")?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_3x3() -> Matrix {
        Matrix::from_values(3, 3, &[1.0, 1.0, -1.0, 1.0, 0.0, 1.0, 2.0, 1.0, 1.0])
    }

    fn sample_4x4() -> Matrix {
        Matrix::from_values(
            4,
            4,
            &[
                2.0, 5.0, 0.0, 8.0, //
                1.0, 4.0, 2.0, 6.0, //
                7.0, 8.0, 9.0, 3.0, //
                1.0, 5.0, 7.0, 8.0,
            ],
        )
    }

    #[test]
    fn new_is_zero_filled() {
        let m = Matrix::new(2, 3);
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        for r in 0..2 {
            for c in 0..3 {
                assert_eq!(m.get(r, c), Ok(0.0));
            }
        }
    }

    #[test]
    fn from_values_fills_row_major() {
        let m = Matrix::from_values(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.get(0, 2), Ok(3.0));
        assert_eq!(m.get(1, 0), Ok(4.0));
    }

    #[test]
    fn parse_accepts_any_delimiter() {
        let parsed = Matrix::parse(2, 2, "1.5, -2;3e0 4");
        assert_eq!(parsed, Matrix::from_values(2, 2, &[1.5, -2.0, 3.0, 4.0]));
    }

    #[test]
    fn parse_stops_at_malformed_value() {
        let parsed = Matrix::parse(2, 2, "1,2,-,4");
        assert_eq!(parsed.get(0, 1), Ok(2.0));
        assert_eq!(parsed.get(1, 0), Ok(0.0));
        assert_eq!(parsed.get(1, 1), Ok(0.0));
    }

    #[test]
    fn identity_has_unit_diagonal() {
        let id = Matrix::identity(3);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(id.get(r, c), Ok(if r == c { 1.0 } else { 0.0 }));
            }
        }
        assert_eq!(Matrix::identity(0).rows(), 0);
    }

    #[test]
    fn out_of_range_access_is_a_domain_error() {
        let mut m = Matrix::new(2, 2);
        assert!(matches!(m.get(2, 0), Err(DomainError::OutOfDomain { .. })));
        assert!(matches!(m.set(0, 5, 1.0), Err(DomainError::OutOfDomain { .. })));
        assert!(m.update(3, 3, |v| v + 1.0).is_err());
        assert!(m.swap_rows(0, 2).is_err());
        assert!(m.scale_row(9, 2.0).is_err());
        assert!(m.add_row_scaled(0, 1.0, 2).is_err());
    }

    #[test]
    fn update_modifies_in_place() {
        let mut m = Matrix::identity(2);
        m.update(0, 1, |v| v + 3.0).unwrap();
        m.update(0, 0, |v| v * 4.0).unwrap();
        *m.get_mut(1, 0).unwrap() -= 2.5;
        assert_eq!(m.get(0, 1), Ok(3.0));
        assert_eq!(m.get(0, 0), Ok(4.0));
        assert_eq!(m.get(1, 0), Ok(-2.5));
        assert!(m.get_mut(2, 0).is_err());
    }

    #[test]
    fn row_operations() {
        let mut m = Matrix::from_values(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.swap_rows(0, 1).unwrap();
        assert_eq!(m, Matrix::from_values(2, 2, &[3.0, 4.0, 1.0, 2.0]));

        m.scale_row(1, 0.5).unwrap();
        assert_eq!(m, Matrix::from_values(2, 2, &[3.0, 4.0, 0.5, 1.0]));

        m.add_row_scaled(1, 2.0, 0).unwrap();
        assert_eq!(m, Matrix::from_values(2, 2, &[4.0, 6.0, 0.5, 1.0]));
    }

    #[test]
    fn add_row_scaled_snaps_residue_to_zero() {
        let mut m = Matrix::from_values(2, 2, &[1.0, 0.3, 1.0, 0.300_001]);
        m.add_row_scaled(0, -1.0, 1).unwrap();
        assert_eq!(m.get(1, 0), Ok(0.0));
        assert_eq!(m.get(1, 1), Ok(0.0));
    }

    #[test]
    fn transpose_swaps_shape_and_cells() {
        let m = Matrix::from_values(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.get(2, 1), Ok(6.0));
        assert_eq!(t.get(0, 1), Ok(4.0));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn multiply_by_identity_is_noop() {
        let m = Matrix::from_values(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!((&Matrix::identity(2) * &m).unwrap(), m);
        assert_eq!((&m * &Matrix::identity(3)).unwrap(), m);
    }

    #[test]
    fn multiply_computes_product() {
        let a = Matrix::from_values(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = Matrix::from_values(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let expected = Matrix::from_values(2, 2, &[58.0, 64.0, 139.0, 154.0]);
        assert_eq!((a * b).unwrap(), expected);
    }

    #[test]
    fn multiply_with_mismatched_dimensions_fails() {
        let a = Matrix::new(2, 3);
        let b = Matrix::new(2, 3);
        assert!(matches!(
            &a * &b,
            Err(DomainError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn scalar_multiplication() {
        let m = Matrix::from_values(2, 2, &[1.0, -2.0, 3.0, 0.5]);
        let expected = Matrix::from_values(2, 2, &[2.0, -4.0, 6.0, 1.0]);
        assert_eq!(&m * 2.0, expected);

        let mut n = m.clone();
        n *= 2.0;
        assert_eq!(n, expected);
        // Copies are independent.
        assert_eq!(m.get(0, 1), Ok(-2.0));
    }

    #[test]
    fn equality_uses_tolerance_and_shape() {
        let a = Matrix::from_values(1, 2, &[1.0, 2.0]);
        let b = Matrix::from_values(1, 2, &[1.000_001, 2.0]);
        let c = Matrix::from_values(1, 2, &[1.1, 2.0]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.equals(&c, 0.2));
        assert_ne!(a, Matrix::from_values(2, 1, &[1.0, 2.0]));
    }

    #[test]
    fn inverse_of_3x3() {
        let expected = Matrix::from_values(3, 3, &[1.0, 2.0, -1.0, -1.0, -3.0, 2.0, -1.0, -1.0, 1.0]);
        let inv = sample_3x3().inverse().unwrap();
        assert_abs_diff_eq!(inv, expected, epsilon = 1e-5);
    }

    #[test]
    fn inverse_of_4x4() {
        let expected: Vec<f32> = [
            172, -343, 14, 80, //
            -185, 422, 12, -136, //
            -1, -49, 2, 37, //
            95, -178, -11, 65,
        ]
        .iter()
        .map(|&n| n as f32 / 179.0)
        .collect();
        let inv = sample_4x4().inverse().unwrap();
        assert_abs_diff_eq!(inv, Matrix::from_values(4, 4, &expected), epsilon = 1e-5);
    }

    #[test]
    fn inverse_round_trips_to_identity() {
        for m in [sample_3x3(), sample_4x4()] {
            let inv = m.inverse().unwrap();
            let size = m.rows();
            assert_abs_diff_eq!((&m * &inv).unwrap(), Matrix::identity(size), epsilon = 1e-5);
            assert_abs_diff_eq!(inv.inverse().unwrap(), m, epsilon = 1e-4);
        }
    }

    #[test]
    fn inverse_needs_row_swap_when_leading_entry_is_zero() {
        let m = Matrix::from_values(2, 2, &[0.0, 1.0, 1.0, 0.0]);
        assert_eq!(m.inverse().unwrap(), m);
    }

    #[test]
    fn inverse_of_matrix_with_zero_row_is_singular() {
        let m = Matrix::from_values(3, 3, &[1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0]);
        let err = m.inverse().unwrap_err();
        assert_eq!(err, DomainError::Singular);
        assert!(err.to_string().contains("no inverse"));
    }

    #[test]
    fn inverse_with_skipped_column_is_singular() {
        // Column 0 is all zeros: no pivot, but elimination carries on.
        let m = Matrix::from_values(3, 3, &[0.0, 1.0, 2.0, 0.0, 3.0, 4.0, 0.0, 5.0, 7.0]);
        assert_eq!(m.inverse().unwrap_err(), DomainError::Singular);
    }

    #[test]
    fn inverse_of_dependent_rows_is_singular() {
        let m = Matrix::from_values(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        assert_eq!(m.inverse().unwrap_err(), DomainError::Singular);
    }

    #[test]
    fn inverse_requires_square_matrix() {
        assert!(matches!(
            Matrix::new(2, 3).inverse(),
            Err(DomainError::NotSquare { rows: 2, cols: 3 })
        ));
    }

    #[test]
    fn display_lists_rows() {
        let m = Matrix::from_values(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m.to_string(), "[1.0000,\t2.0000,\n 3.0000,\t4.0000,]");
    }
}
