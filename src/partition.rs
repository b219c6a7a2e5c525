use std::ops::Range;

use crate::error::{MatmultError, Result};

/// Split the row index space `[0, rows)` into `workers` ordered, pairwise
/// disjoint, gap-free contiguous ranges.
///
/// The split is static and even; the final range absorbs the remainder.
/// With more workers than rows the leading ranges come out empty, which the
/// kernels treat as no work. The partition is computed in full before any
/// worker writes, so a bad configuration can never leave a half-filled
/// output.
pub fn partition_rows(rows: usize, workers: usize) -> Result<Vec<Range<usize>>> {
    if workers == 0 {
        return Err(MatmultError::Configuration {
            name: "worker count",
            value: workers,
        });
    }
    let chunk = rows / workers;
    let mut ranges = Vec::with_capacity(workers);
    for w in 0..workers {
        let start = w * chunk;
        let end = if w + 1 == workers { rows } else { start + chunk };
        ranges.push(start..end);
    }
    Ok(ranges)
}
