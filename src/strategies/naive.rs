use std::ops::Range;

use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::{Matrix, Scalar};
use crate::partition::partition_rows;
use crate::strategies::{check_dims, row_slabs, worker_pool};

/// Unblocked multiplication: the textbook triple loop, one scalar
/// accumulator per output cell.
pub fn matmul_naive<T: Scalar>(a: &Matrix<T>, b: &Matrix<T>, res: &mut Matrix<T>) -> Result<()> {
    check_dims(a, b, res)?;
    let rows = a.rows();
    multiply_rows(a, b, res.as_mut_slice(), 0..rows);
    Ok(())
}

/// Unblocked multiplication with the row space statically split across
/// `workers` threads. Inputs are shared read-only; each worker writes only
/// its own slab of the output, so no synchronisation is needed.
pub fn matmul_naive_parallel<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    res: &mut Matrix<T>,
    workers: usize,
) -> Result<()> {
    check_dims(a, b, res)?;
    let ranges = partition_rows(a.rows(), workers)?;
    let pool = worker_pool(workers)?;
    let slabs = row_slabs(res, &ranges);
    pool.install(|| {
        slabs
            .into_par_iter()
            .for_each(|(range, out)| multiply_rows(a, b, out, range));
    });
    Ok(())
}

/// Compute output rows `rows` into `out`, a slab holding exactly those rows.
pub(crate) fn multiply_rows<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    out: &mut [T],
    rows: Range<usize>,
) {
    let cols = b.cols();
    let inner = a.cols();
    let bd = b.as_slice();
    for (local, i) in rows.enumerate() {
        let a_row = a.row(i);
        let out_row = &mut out[local * cols..(local + 1) * cols];
        for (j, cell) in out_row.iter_mut().enumerate() {
            let mut acc = T::ZERO;
            for x in 0..inner {
                acc += a_row[x] * bd[x * cols + j];
            }
            *cell = acc;
        }
    }
}
