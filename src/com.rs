use itertools::izip;
use na::Vector3;

use crate::types::Float;

/// Combine a collection of point masses into a total mass and the location
/// of their common center of mass:
///     com = Σ mᵢ pᵢ / Σ mᵢ
pub fn total_com(coordinates: &[Vector3<Float>], masses: &[Float]) -> (Float, Vector3<Float>) {
    let mut total_mass = 0.0;
    let mut weighted = Vector3::zeros();
    for (position, mass) in izip!(coordinates.iter(), masses.iter()) {
        total_mass += mass;
        weighted += position * *mass;
    }
    (total_mass, weighted / total_mass)
}
