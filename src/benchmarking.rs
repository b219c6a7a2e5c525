use std::time::{Duration, Instant};

use crate::error::{MatmultError, Result};
use crate::matrix::{Matrix, Scalar};
use crate::strategies::{MultiplyOpts, Strategy};

/// Run `strategy` `tries` times over the same inputs and return the mean
/// wall-clock duration in milliseconds.
///
/// Inputs are reused across trials; the output matrix is overwritten by each
/// run. Dimension and configuration errors propagate from the strategy
/// before any timing is recorded.
pub fn benchmark<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    res: &mut Matrix<T>,
    strategy: Strategy,
    opts: &MultiplyOpts,
    tries: usize,
) -> Result<f64> {
    benchmark_observed(a, b, res, strategy, opts, tries, |_| {})
}

/// Like [`benchmark`], invoking `observe` with each trial's duration.
pub fn benchmark_observed<T: Scalar>(
    a: &Matrix<T>,
    b: &Matrix<T>,
    res: &mut Matrix<T>,
    strategy: Strategy,
    opts: &MultiplyOpts,
    tries: usize,
    mut observe: impl FnMut(Duration),
) -> Result<f64> {
    if tries == 0 {
        return Err(MatmultError::Configuration {
            name: "trial count",
            value: tries,
        });
    }
    let mut total = Duration::ZERO;
    for _ in 0..tries {
        let start = Instant::now();
        strategy.execute(a, b, res, opts)?;
        let elapsed = start.elapsed();
        observe(elapsed);
        total += elapsed;
    }
    Ok(total.as_secs_f64() * 1_000.0 / tries as f64)
}

/// Fallback trial count for a given matrix dimension: more repetitions for
/// small matrices, a single trial once a run gets expensive.
pub fn default_tries(dimension: usize) -> usize {
    match dimension {
        0..=128 => 10,
        129..=512 => 5,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tries_scales_down_with_size() {
        assert_eq!(default_tries(100), 10);
        assert_eq!(default_tries(256), 5);
        assert_eq!(default_tries(1024), 1);
    }
}
