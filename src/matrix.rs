use std::fmt::Display;
use std::io::{self, Write};
use std::ops::{Add, AddAssign, Mul};

use rand::distributions::uniform::SampleUniform;

use crate::error::{MatmultError, Result};

/// Element types the kernels can multiply.
///
/// Implemented for `f32` and `f64`; the bound set is what the kernels, the
/// random generator and the octave dump actually need.
pub trait Scalar:
    Copy
    + Send
    + Sync
    + PartialOrd
    + Display
    + Add<Output = Self>
    + AddAssign
    + Mul<Output = Self>
    + SampleUniform
{
    const ZERO: Self;
    const ONE: Self;

    fn from_f64(v: f64) -> Self;
    fn to_f64(self) -> f64;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// Dense row-major matrix over a single contiguous buffer.
///
/// Element `(r, c)` lives at `data[r * cols + c]`. Dimensions are fixed at
/// construction; `data.len() == rows * cols` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Scalar> Matrix<T> {
    /// Zero-initialised `rows x cols` matrix.
    pub fn zeroed(rows: usize, cols: usize) -> Result<Self> {
        check_shape(rows, cols)?;
        Ok(Matrix {
            rows,
            cols,
            data: vec![T::ZERO; rows * cols],
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        check_shape(rows, cols)?;
        assert_eq!(
            data.len(),
            rows * cols,
            "buffer of {} elements does not fit a {}x{} matrix",
            data.len(),
            rows,
            cols
        );
        Ok(Matrix { rows, cols, data })
    }

    /// Unit diagonal up to `min(rows, cols)`, zero elsewhere.
    pub fn identity(rows: usize, cols: usize) -> Result<Self> {
        let mut mat = Self::zeroed(rows, cols)?;
        for i in 0..rows.min(cols) {
            mat.set(i, i, T::ONE);
        }
        Ok(mat)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize) -> T {
        self.data[r * self.cols + c]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, v: T) {
        self.data[r * self.cols + c] = v;
    }

    /// Row `r` as a slice.
    #[inline]
    pub fn row(&self, r: usize) -> &[T] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Reset every element to zero, keeping the allocation.
    pub fn fill_zero(&mut self) {
        self.data.fill(T::ZERO);
    }

    /// Write the contents as an Octave/MATLAB matrix literal, e.g.
    /// `C = [1 2 ;\n3 4 \n];`, for offline verification. One-way export.
    pub fn write_octave<W: Write>(&self, w: &mut W, name: &str) -> io::Result<()> {
        write!(w, "{} = [", name)?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                write!(w, "{} ", self.get(r, c))?;
            }
            writeln!(w, "{}", if r + 1 == self.rows { "" } else { ";" })?;
        }
        writeln!(w, "];")
    }
}

fn check_shape(rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        return Err(MatmultError::Dimension { rows, cols });
    }
    Ok(())
}
