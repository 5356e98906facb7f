use na::{Matrix2, Matrix3, SymmetricEigen};

use crate::types::Float;

/// Principal description of a body's planar mass distribution: the radii of
/// gyration about the in-plane principal axes and the spin axis, and the
/// rotation from the global x axis to the axis of the larger moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalRadii {
    pub kmax: Float,
    pub kmin: Float,
    pub kyy: Float,
    pub angle_to_max: Float,
}

/// Assemble the inertia tensor of a body that is symmetric about the XZ
/// plane, so the xy and yz products vanish and y is a principal axis.
#[rustfmt::skip]
pub fn inertia_tensor_from_components(
    Ixx: Float,
    Ixz: Float,
    Iyy: Float,
    Izz: Float,
) -> Matrix3<Float> {
    Matrix3::new(
        Ixx, 0.0, Ixz,
        0.0, Iyy, 0.0,
        Ixz, 0.0, Izz,
    )
}

/// Eigen-decompose the XZ sub-tensor of a planar-symmetric inertia tensor
/// into principal radii of gyration and the orientation of the major
/// principal axis.
///
/// The z component of the eigenvector is negated before the arctangent so
/// the rotation sign matches a drawing plane where z points down; that sign
/// is a fixed convention and must not be changed.
pub fn decompose_planar_inertia(tensor: &Matrix3<Float>, mass: Float) -> PrincipalRadii {
    // y is already a principal axis, drop its row and column
    #[rustfmt::skip]
    let planar = Matrix2::new(
        tensor[(0, 0)], tensor[(0, 2)],
        tensor[(2, 0)], tensor[(2, 2)],
    );
    let eigen = SymmetricEigen::new(planar);

    let (min_idx, max_idx) = if eigen.eigenvalues[0] <= eigen.eigenvalues[1] {
        (0, 1)
    } else {
        (1, 0)
    };
    let evec_max = eigen.eigenvectors.column(max_idx);

    PrincipalRadii {
        kmax: (eigen.eigenvalues[max_idx] / mass).sqrt(),
        kmin: (eigen.eigenvalues[min_idx] / mass).sqrt(),
        kyy: (tensor[(1, 1)] / mass).sqrt(),
        angle_to_max: (-evec_max[1]).atan2(evec_max[0]),
    }
}

/// Rotate a diagonal principal inertia matrix back into the global XZ frame,
/// the algebraic inverse of [`decompose_planar_inertia`]. `kaa` is the
/// radius about the axis at `alpha` from x, `kbb` the one perpendicular to
/// it, and `kyy` the spin-axis radius. Returns (Ixx, Ixz, Iyy, Izz).
pub fn principal_radii_to_inertia(
    mass: Float,
    kaa: Float,
    kbb: Float,
    kyy: Float,
    alpha: Float,
) -> (Float, Float, Float, Float) {
    let (s, c) = alpha.sin_cos();
    let Ixx = mass * (kaa * kaa * c * c + kbb * kbb * s * s);
    let Izz = mass * (kaa * kaa * s * s + kbb * kbb * c * c);
    let Ixz = mass * (kbb * kbb - kaa * kaa) * s * c;
    let Iyy = mass * kyy * kyy;
    (Ixx, Ixz, Iyy, Izz)
}

#[cfg(test)]
mod inertia_tests {
    use super::*;
    use crate::assert_close;
    use crate::util::test_utils::{random_in, random_value};

    #[test]
    fn benchmark_handlebar_decomposition() {
        // Arrange: the benchmark handlebar/fork tensor has planar
        // eigenvalues of exactly 0.06 and 0.006.
        let mass = 4.0;
        let tensor = inertia_tensor_from_components(0.05892, -0.00756, 0.06, 0.00708);

        // Act
        let radii = decompose_planar_inertia(&tensor, mass);

        // Assert
        assert_close!(radii.kmax, (0.06f64 / 4.0).sqrt(), 1e-12);
        assert_close!(radii.kmin, (0.006f64 / 4.0).sqrt(), 1e-12);
        assert_close!(radii.kyy, (0.06f64 / 4.0).sqrt(), 1e-12);
        // the major axis leans arctan(1/7) off x; the eigenvector sign is
        // arbitrary so compare the direction, not the quadrant
        assert_close!(radii.angle_to_max.tan(), 1.0 / 7.0, 1e-12);
    }

    #[test]
    fn axisymmetric_wheel_has_equal_planar_radii() {
        let mass = 2.0;
        let tensor = inertia_tensor_from_components(0.0603, 0.0, 0.12, 0.0603);

        let radii = decompose_planar_inertia(&tensor, mass);

        assert_close!(radii.kmax, (0.0603f64 / 2.0).sqrt(), 1e-12);
        assert_close!(radii.kmin, (0.0603f64 / 2.0).sqrt(), 1e-12);
        assert_close!(radii.kyy, (0.12f64 / 2.0).sqrt(), 1e-12);
    }

    #[test]
    fn reconstruction_round_trips_random_tensors() {
        let mut rng = rand::rng();

        for _ in 0..100 {
            // Arrange: a random valid principal description
            let mass = random_in(&mut rng, 0.1, 100.0);
            let kaa = random_in(&mut rng, 0.01, 2.0);
            let kbb = random_in(&mut rng, 0.01, 2.0);
            let kyy = random_in(&mut rng, 0.01, 2.0);
            let alpha = random_value(&mut rng, std::f64::consts::FRAC_PI_2);

            let (Ixx, Ixz, Iyy, Izz) = principal_radii_to_inertia(mass, kaa, kbb, kyy, alpha);
            let tensor = inertia_tensor_from_components(Ixx, Ixz, Iyy, Izz);

            // Act: decompose and rebuild
            let radii = decompose_planar_inertia(&tensor, mass);
            let (rIxx, rIxz, rIyy, rIzz) = principal_radii_to_inertia(
                mass,
                radii.kmax,
                radii.kmin,
                radii.kyy,
                radii.angle_to_max,
            );

            // Assert: the tensor entries survive the round trip
            assert_close!(rIxx, Ixx, 1e-10);
            assert_close!(rIxz, Ixz, 1e-10);
            assert_close!(rIyy, Iyy, 1e-10);
            assert_close!(rIzz, Izz, 1e-10);
        }
    }
}
