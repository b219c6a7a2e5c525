use rand::Rng;
use rand_distr::Uniform;

use crate::error::{MatmultError, Result};
use crate::matrix::{Matrix, Scalar};

/// Fill `mat` with values sampled uniformly from `[lo, hi)`.
///
/// The PRNG is caller-owned so a run can be reproduced from its seed.
pub fn fill_uniform<T: Scalar>(
    mat: &mut Matrix<T>,
    rng: &mut impl Rng,
    lo: T,
    hi: T,
) -> Result<()> {
    if !(lo < hi) {
        return Err(MatmultError::SampleRange);
    }
    let distribution = Uniform::new(lo, hi);
    for v in mat.as_mut_slice() {
        *v = rng.sample(&distribution);
    }
    Ok(())
}

/// A fresh `rows x cols` matrix filled from `[lo, hi)`.
pub fn random_matrix<T: Scalar>(
    rows: usize,
    cols: usize,
    lo: T,
    hi: T,
    rng: &mut impl Rng,
) -> Result<Matrix<T>> {
    let mut mat = Matrix::zeroed(rows, cols)?;
    fill_uniform(&mut mat, rng, lo, hi)?;
    Ok(mat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn values_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for e in -3..4 {
            let scale = 10f64.powi(e);
            let mat = random_matrix::<f64>(32, 32, -scale, scale, &mut rng).unwrap();
            assert!(
                mat.as_slice().iter().all(|&x| -scale <= x && x < scale),
                "scale: {}, power: {}",
                scale,
                e
            );
        }
    }

    #[test]
    fn same_seed_same_matrix() {
        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = random_matrix::<f32>(8, 8, 0.0, 10.0, &mut rng_a).unwrap();
        let b = random_matrix::<f32>(8, 8, 0.0, 10.0, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut mat = Matrix::<f32>::zeroed(2, 2).unwrap();
        assert!(matches!(
            fill_uniform(&mut mat, &mut rng, 5.0, 5.0),
            Err(MatmultError::SampleRange)
        ));
    }
}
