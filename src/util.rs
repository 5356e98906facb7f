use na::{Complex, Matrix4, Schur, Vector4};

use crate::types::Float;

/// Eigenvalues and unit right eigenvectors of a real 4x4 matrix.
///
/// The eigenvalues come from the real Schur form. nalgebra has no general
/// nonsymmetric eigenvector routine, so each right eigenvector is recovered
/// as the null direction of (A - λI) with a complex SVD. Column i of the
/// returned matrix pairs with eigenvalue i; no further ordering is imposed.
/// Returns None if the Schur iteration does not converge.
pub fn complex_eigen4(
    A: &Matrix4<Float>,
) -> Option<(Vector4<Complex<Float>>, Matrix4<Complex<Float>>)> {
    let schur = Schur::try_new(*A, Float::EPSILON, 10_000)?;
    let values = schur.complex_eigenvalues();

    let Ac = A.map(|entry| Complex::new(entry, 0.0));
    let mut vectors = Matrix4::<Complex<Float>>::zeros();
    for (i, lambda) in values.iter().enumerate() {
        let shifted = Ac - Matrix4::from_diagonal_element(*lambda);
        let svd = shifted.svd(false, true);
        let v_t = svd.v_t?;

        // The right singular vector of the smallest singular value spans the
        // null space of the shifted matrix.
        let mut min_idx = 0;
        for (j, sigma) in svd.singular_values.iter().enumerate() {
            if *sigma < svd.singular_values[min_idx] {
                min_idx = j;
            }
        }
        let v = v_t.row(min_idx).adjoint();
        vectors.set_column(i, &v.unscale(v.norm()));
    }

    Some((values, vectors))
}

#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        let tol = $tolerance;
        let diff = (left - right).abs();
        if diff > tol {
            panic!(
                "assertion failed: {} ~= {} \
                (tolerance: {}, difference: {})",
                left, right, tol, diff
            );
        }
    };
}

#[macro_export]
macro_rules! assert_mat_close {
    ($left:expr, $right:expr, $tolerance:expr) => {
        let left = $left;
        let right = $right;
        for (a, b) in left.iter().zip(right.iter()) {
            $crate::assert_close!(*a, *b, $tolerance);
        }
    };
}

#[cfg(test)]
pub mod test_utils {
    use rand::rngs::ThreadRng;
    use rand::Rng;

    use crate::types::Float;

    /// A random value between (-range, range).
    pub fn random_value(rng: &mut ThreadRng, range: Float) -> Float {
        rng.random_range(-range..range)
    }

    /// A random value between (lower, upper).
    pub fn random_in(rng: &mut ThreadRng, lower: Float, upper: Float) -> Float {
        rng.random_range(lower..upper)
    }
}
