use std::ops::Range;

use rayon::prelude::*;

use crate::error::{MatmultError, Result};
use crate::matrix::{Matrix, Scalar};
use crate::partition::partition_rows;
use crate::strategies::{check_dims, row_slabs, worker_pool};

/// Cache-blocked multiplication.
///
/// The iteration space is cut into row tiles of height `row_tile` and
/// reduction tiles of width `k_tile`; inside a tile pair the output is
/// produced in 2x2 register blocks. Output cells hold the running partial
/// sums between reduction tiles, so the final values match the unblocked
/// strategy up to floating-point reassociation.
///
/// Odd dimensions are clamped: the 2x2 sweep covers the even prefix of the
/// rows and columns, and a leftover row or column is finished by a scalar
/// remainder loop.
pub fn matmul_tiled<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    res: &mut Matrix<T>,
    row_tile: usize,
    k_tile: usize,
) -> Result<()> {
    check_dims(a, b, res)?;
    let (row_tile, k_tile) = check_tiles(row_tile, k_tile)?;
    let rows = a.rows();
    multiply_rows_tiled(a, b, res.as_mut_slice(), 0..rows, row_tile, k_tile);
    Ok(())
}

/// Cache-blocked multiplication with the row-tile loop distributed across
/// `workers` threads.
///
/// Each worker runs the full tiled kernel over its own contiguous row range;
/// the running-accumulator protocol only ever reads output cells inside the
/// worker's own slab.
pub fn matmul_tiled_parallel<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    res: &mut Matrix<T>,
    row_tile: usize,
    k_tile: usize,
    workers: usize,
) -> Result<()> {
    check_dims(a, b, res)?;
    let (row_tile, k_tile) = check_tiles(row_tile, k_tile)?;
    let ranges = partition_rows(a.rows(), workers)?;
    let pool = worker_pool(workers)?;
    let slabs = row_slabs(res, &ranges);
    pool.install(|| {
        slabs.into_par_iter().for_each(|(range, out)| {
            multiply_rows_tiled(a, b, out, range, row_tile, k_tile)
        });
    });
    Ok(())
}

/// Tile sizes must be positive; the row tile is rounded up to even so a
/// 2-row register block never straddles a tile boundary.
fn check_tiles(row_tile: usize, k_tile: usize) -> Result<(usize, usize)> {
    if row_tile == 0 {
        return Err(MatmultError::Configuration {
            name: "row tile",
            value: row_tile,
        });
    }
    if k_tile == 0 {
        return Err(MatmultError::Configuration {
            name: "k tile",
            value: k_tile,
        });
    }
    Ok((row_tile + (row_tile & 1), k_tile))
}

/// Tiled kernel over the row range `rows`, writing into `out`, a slab
/// holding exactly those rows. Row indices inside `out` are relative to
/// `rows.start`, which is also the blocking origin for this range.
pub(crate) fn multiply_rows_tiled<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    out: &mut [T],
    rows: Range<usize>,
    row_tile: usize,
    k_tile: usize,
) {
    let cols = b.cols();
    let inner = a.cols();
    let bd = b.as_slice();
    let base = rows.start;
    let height = rows.end - rows.start;
    let pair_rows = height & !1;
    let pair_cols = cols & !1;

    for ii in (0..pair_rows).step_by(row_tile) {
        let ilim = (ii + row_tile).min(pair_rows);
        for kk in (0..inner).step_by(k_tile) {
            let klim = (kk + k_tile).min(inner);
            for j in (0..pair_cols).step_by(2) {
                for i in (ii..ilim).step_by(2) {
                    let a0 = a.row(base + i);
                    let a1 = a.row(base + i + 1);
                    // Accumulators start at zero on the first reduction tile
                    // and are reloaded from the partial sums in `out` on
                    // every later one.
                    let (mut acc00, mut acc01, mut acc10, mut acc11) = if kk == 0 {
                        (T::ZERO, T::ZERO, T::ZERO, T::ZERO)
                    } else {
                        (
                            out[i * cols + j],
                            out[i * cols + j + 1],
                            out[(i + 1) * cols + j],
                            out[(i + 1) * cols + j + 1],
                        )
                    };
                    for k in kk..klim {
                        let b0 = bd[k * cols + j];
                        let b1 = bd[k * cols + j + 1];
                        acc00 += b0 * a0[k];
                        acc01 += b1 * a0[k];
                        acc10 += b0 * a1[k];
                        acc11 += b1 * a1[k];
                    }
                    out[i * cols + j] = acc00;
                    out[i * cols + j + 1] = acc01;
                    out[(i + 1) * cols + j] = acc10;
                    out[(i + 1) * cols + j + 1] = acc11;
                }
            }
            if pair_cols < cols {
                // Leftover odd column: 2x1 blocks under the same protocol.
                let j = pair_cols;
                for i in (ii..ilim).step_by(2) {
                    let a0 = a.row(base + i);
                    let a1 = a.row(base + i + 1);
                    let (mut acc0, mut acc1) = if kk == 0 {
                        (T::ZERO, T::ZERO)
                    } else {
                        (out[i * cols + j], out[(i + 1) * cols + j])
                    };
                    for k in kk..klim {
                        let bk = bd[k * cols + j];
                        acc0 += bk * a0[k];
                        acc1 += bk * a1[k];
                    }
                    out[i * cols + j] = acc0;
                    out[(i + 1) * cols + j] = acc1;
                }
            }
        }
    }

    if pair_rows < height {
        // Leftover odd row sits outside the 2x2 blocking; plain accumulation
        // over the full reduction gives the same result.
        let i = pair_rows;
        let a0 = a.row(base + i);
        let out_row = &mut out[i * cols..(i + 1) * cols];
        for (j, cell) in out_row.iter_mut().enumerate() {
            let mut acc = T::ZERO;
            for k in 0..inner {
                acc += a0[k] * bd[k * cols + j];
            }
            *cell = acc;
        }
    }
}
