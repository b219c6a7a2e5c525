pub mod naive;
pub mod tiled;

pub use naive::{matmul_naive, matmul_naive_parallel};
pub use tiled::{matmul_tiled, matmul_tiled_parallel};

use std::ops::Range;

use crate::error::{MatmultError, Result};
use crate::matrix::{Matrix, Scalar};

/// Default tile height and reduction width for the tiled strategies.
pub const DEFAULT_TILE: usize = 30;
/// Default worker count for the parallel strategies.
pub const DEFAULT_WORKERS: usize = 4;

/// Tuning knobs shared by the strategies. A strategy only reads the fields
/// it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiplyOpts {
    /// Row tile height for the tiled strategies.
    pub row_tile: usize,
    /// Reduction-index tile width for the tiled strategies.
    pub k_tile: usize,
    /// Thread count for the parallel strategies.
    pub workers: usize,
}

impl Default for MultiplyOpts {
    fn default() -> Self {
        MultiplyOpts {
            row_tile: DEFAULT_TILE,
            k_tile: DEFAULT_TILE,
            workers: DEFAULT_WORKERS,
        }
    }
}

/// The four interchangeable multiplication algorithms. All compute the same
/// product; they differ in loop blocking and parallelism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Naive,
    Tiled,
    NaiveParallel,
    TiledParallel,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Naive,
        Strategy::Tiled,
        Strategy::NaiveParallel,
        Strategy::TiledParallel,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Tiled => "tiled",
            Strategy::NaiveParallel => "parallel",
            Strategy::TiledParallel => "tiled parallel",
        }
    }

    /// Variant tag written to the CSV output. The tags predate this crate
    /// and the downstream plotting scripts key on them, so they stay as-is.
    pub fn csv_tag(self) -> &'static str {
        match self {
            Strategy::Naive => "no opt",
            Strategy::Tiled => "with opt",
            Strategy::NaiveParallel => "parallel",
            Strategy::TiledParallel => "with opt+parallel",
        }
    }

    /// Compute `res = a * b` with this strategy.
    pub fn execute<T: Scalar>(
        self,
        a: &Matrix<T>,
        b: &Matrix<T>,
        res: &mut Matrix<T>,
        opts: &MultiplyOpts,
    ) -> Result<()> {
        match self {
            Strategy::Naive => matmul_naive(a, b, res),
            Strategy::Tiled => matmul_tiled(a, b, res, opts.row_tile, opts.k_tile),
            Strategy::NaiveParallel => matmul_naive_parallel(a, b, res, opts.workers),
            Strategy::TiledParallel => {
                matmul_tiled_parallel(a, b, res, opts.row_tile, opts.k_tile, opts.workers)
            }
        }
    }
}

/// Shapes must conform before any output cell is written.
pub(crate) fn check_dims<T>(a: &Matrix<T>, b: &Matrix<T>, res: &Matrix<T>) -> Result<()>
where
    T: Scalar,
{
    if a.cols() != b.rows() || res.rows() != a.rows() || res.cols() != b.cols() {
        return Err(MatmultError::DimensionMismatch {
            m: a.rows(),
            k: a.cols(),
            k2: b.rows(),
            n: b.cols(),
            out_rows: res.rows(),
            out_cols: res.cols(),
        });
    }
    Ok(())
}

/// Split the output into one `&mut` slab per partition range. Each worker
/// gets exclusive access to exactly its rows, so disjoint writes hold by
/// construction rather than by convention.
pub(crate) fn row_slabs<'m, T>(
    res: &'m mut Matrix<T>,
    ranges: &[Range<usize>],
) -> Vec<(Range<usize>, &'m mut [T])>
where
    T: Scalar,
{
    let cols = res.cols();
    let mut rest = res.as_mut_slice();
    let mut slabs = Vec::with_capacity(ranges.len());
    for range in ranges {
        let slice = std::mem::take(&mut rest);
        let (head, tail) = slice.split_at_mut((range.end - range.start) * cols);
        slabs.push((range.clone(), head));
        rest = tail;
    }
    slabs
}

pub(crate) fn worker_pool(workers: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| MatmultError::WorkerPool(e.to_string()))
}
