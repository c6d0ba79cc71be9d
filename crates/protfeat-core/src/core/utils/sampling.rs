use super::geometry::{normalize, rotation_to_euler};
use nalgebra::{DVector, Matrix3, Vector3};
use rand::Rng;
use rand_distr::StandardNormal;

/// Draws a vector uniformly distributed on the unit `(dim - 1)`-sphere.
pub fn random_unit_vector(dim: usize, rng: &mut impl Rng) -> DVector<f64> {
    loop {
        let v = DVector::from_fn(dim, |_, _| rng.sample::<f64, _>(StandardNormal));
        let norm = v.norm();
        if norm > 0.0 {
            return v / norm;
        }
    }
}

/// Three-dimensional specialization of [`random_unit_vector`].
pub fn random_direction(rng: &mut impl Rng) -> Vector3<f64> {
    let v = random_unit_vector(3, rng);
    Vector3::new(v[0], v[1], v[2])
}

/// Draws a rotation matrix uniformly distributed over SO(3).
///
/// The rows are a random unit vector `x`, `y = normalize(x × t)` for an
/// independent random `t`, and `z = x × y`.
pub fn random_rotation_matrix(rng: &mut impl Rng) -> Matrix3<f64> {
    let x = random_direction(rng);
    let mut t = random_direction(rng);
    while x.cross(&t).norm() == 0.0 {
        t = random_direction(rng);
    }
    let y = normalize(&x.cross(&t));
    let z = x.cross(&y);

    Matrix3::from_rows(&[x.transpose(), y.transpose(), z.transpose()])
}

/// Euler angles of a uniformly random rotation.
pub fn random_euler_angles(rng: &mut impl Rng) -> (f64, f64, f64) {
    rotation_to_euler(&random_rotation_matrix(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::geometry::euler_to_rotation;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn random_unit_vector_has_unit_norm_in_any_dimension() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for dim in [1, 2, 3, 5, 10] {
            let v = random_unit_vector(dim, &mut rng);
            assert_eq!(v.len(), dim);
            assert!((v.norm() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn random_rotation_matrix_is_orthonormal_with_positive_determinant() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..200 {
            let r = random_rotation_matrix(&mut rng);
            let should_be_identity = r * r.transpose();
            assert!(
                (should_be_identity - Matrix3::identity())
                    .iter()
                    .all(|v| v.abs() < 1e-9)
            );
            assert!((r.determinant() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn random_euler_angles_reproduce_a_valid_rotation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let (tx, ty, tz) = random_euler_angles(&mut rng);
            let r = euler_to_rotation(tx, ty, tz);
            assert!((r.determinant() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(11);
        let mut b = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(random_rotation_matrix(&mut a), random_rotation_matrix(&mut b));
    }
}
