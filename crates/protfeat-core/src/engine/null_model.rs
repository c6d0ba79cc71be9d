use crate::core::models::feature::MicroEnvironmentFeature;
use crate::core::utils::sampling::{random_direction, random_euler_angles};
use rand::Rng;
use std::f64::consts::PI;
use tracing::instrument;

/// Range of CA-to-CA distances drawn for null-model shifts, in Angstroms.
pub const SHIFT_LENGTH_RANGE: (f64, f64) = (3.5, 6.0);

/// Draws one feature from the null model: independent uniform torsions, a
/// shift of uniform length in a uniform direction and a uniform rotation.
pub fn random_feature(rng: &mut impl Rng) -> MicroEnvironmentFeature {
    let mut torsion = || rng.gen_range(-PI..PI);
    let (phi1, psi1, phi2, psi2) = (torsion(), torsion(), torsion(), torsion());

    let length = rng.gen_range(SHIFT_LENGTH_RANGE.0..SHIFT_LENGTH_RANGE.1);
    let shift = random_direction(rng) * length;
    let (theta_x, theta_y, theta_z) = random_euler_angles(rng);

    MicroEnvironmentFeature {
        phi1,
        psi1,
        phi2,
        psi2,
        shift,
        theta_x,
        theta_y,
        theta_z,
    }
}

#[instrument(skip(rng))]
pub fn random_features(count: usize, rng: &mut impl Rng) -> Vec<MicroEnvironmentFeature> {
    (0..count).map(|_| random_feature(rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn samples_stay_within_their_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let features = random_features(500, &mut rng);
        assert_eq!(features.len(), 500);

        for f in &features {
            for angle in [f.phi1, f.psi1, f.phi2, f.psi2] {
                assert!((-PI..PI).contains(&angle));
            }
            let length = f.shift.norm();
            assert!(length >= SHIFT_LENGTH_RANGE.0 - 1e-12 && length < SHIFT_LENGTH_RANGE.1 + 1e-12);
            for angle in [f.theta_x, f.theta_z] {
                assert!(angle.abs() <= PI);
            }
            assert!(f.theta_y.abs() <= PI / 2.0 + 1e-12);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = random_features(10, &mut ChaCha8Rng::seed_from_u64(42));
        let b = random_features(10, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn zero_samples_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(random_features(0, &mut rng).is_empty());
    }
}
