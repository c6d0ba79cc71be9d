use crate::core::utils::geometry::euler_to_rotation;
use nalgebra::Vector3;

/// Number of columns of the persisted feature table.
pub const FEATURE_COLUMNS: usize = 10;

/// Length of the vector produced by [`MicroEnvironmentFeature::to_ml_vector`].
pub const ML_VECTOR_LEN: usize = 20;

/// Relative geometry of a residue and its nearest non-bonded neighbor.
///
/// Torsions are in radians. `shift` is the CA-to-CA displacement in the first
/// residue's local frame and the three angles decompose the rotation carrying
/// the first residue's frame onto the second's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicroEnvironmentFeature {
    pub phi1: f64,
    pub psi1: f64,
    pub phi2: f64,
    pub psi2: f64,
    pub shift: Vector3<f64>,
    pub theta_x: f64,
    pub theta_y: f64,
    pub theta_z: f64,
}

impl MicroEnvironmentFeature {
    /// Flattens the record in persisted column order.
    pub fn to_row(&self) -> [f64; FEATURE_COLUMNS] {
        [
            self.phi1,
            self.psi1,
            self.phi2,
            self.psi2,
            self.shift.x,
            self.shift.y,
            self.shift.z,
            self.theta_x,
            self.theta_y,
            self.theta_z,
        ]
    }

    pub fn from_row(row: [f64; FEATURE_COLUMNS]) -> Self {
        Self {
            phi1: row[0],
            psi1: row[1],
            phi2: row[2],
            psi2: row[3],
            shift: Vector3::new(row[4], row[5], row[6]),
            theta_x: row[7],
            theta_y: row[8],
            theta_z: row[9],
        }
    }

    /// Expands the record into a topology-preserving vector for learning.
    ///
    /// Each torsion becomes its `(cos, sin)` pair and the Euler angles become
    /// the nine row-major entries of their rotation matrix.
    pub fn to_ml_vector(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(ML_VECTOR_LEN);
        for angle in [self.phi1, self.psi1, self.phi2, self.psi2] {
            out.push(angle.cos());
            out.push(angle.sin());
        }
        out.extend(self.shift.iter());

        let rotation = euler_to_rotation(self.theta_x, self.theta_y, self.theta_z);
        for row in rotation.row_iter() {
            out.extend(row.iter());
        }
        out
    }
}
