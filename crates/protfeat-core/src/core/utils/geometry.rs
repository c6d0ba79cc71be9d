use nalgebra::{Matrix3, Point3, Rotation3, Vector3};
use std::f64::consts::PI;

/// Scales `v` to unit length.
///
/// A vector of exactly zero norm is returned unchanged; callers that can see
/// coincident atoms must guard against that case themselves.
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let norm = v.norm();
    if norm == 0.0 { *v } else { v / norm }
}

/// A local orthonormal coordinate frame anchored on a residue.
///
/// The columns of `basis` are the frame axes expressed in global coordinates,
/// so `basis * local + origin` maps a local point into the global frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResidueFrame {
    pub basis: Matrix3<f64>,
    pub origin: Point3<f64>,
}

impl ResidueFrame {
    pub fn x_axis(&self) -> Vector3<f64> {
        self.basis.column(0).into_owned()
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.basis.column(1).into_owned()
    }

    pub fn z_axis(&self) -> Vector3<f64> {
        self.basis.column(2).into_owned()
    }

    /// Expresses a global displacement in this frame's coordinates.
    pub fn to_local(&self, displacement: &Vector3<f64>) -> Vector3<f64> {
        self.basis.transpose() * displacement
    }

    /// Rotation carrying this frame onto `other`, expressed in this frame.
    pub fn relative_rotation(&self, other: &ResidueFrame) -> Matrix3<f64> {
        self.basis.transpose() * other.basis
    }
}

/// Builds the backbone frame of a residue.
///
/// The origin sits on CA, x points from CA to N, z is normal to the N-CA-C
/// plane and y completes a right-handed basis. Collinear N/CA/C atoms give a
/// zero z axis; that degeneracy is passed through to the caller.
pub fn residue_frame(n: &Point3<f64>, ca: &Point3<f64>, c: &Point3<f64>) -> ResidueFrame {
    let x = normalize(&(n - ca));
    let z = normalize(&x.cross(&(c - ca)));
    let y = z.cross(&x);

    ResidueFrame {
        basis: Matrix3::from_columns(&[x, y, z]),
        origin: *ca,
    }
}

/// Decomposes a rotation matrix into XYZ Euler angles `(θx, θy, θz)`.
///
/// Not unique at gimbal lock (`m[2][1] == m[2][2] == 0`).
pub fn rotation_to_euler(m: &Matrix3<f64>) -> (f64, f64, f64) {
    let theta_x = m[(2, 1)].atan2(m[(2, 2)]);
    let theta_y = (-m[(2, 0)]).atan2((m[(2, 1)].powi(2) + m[(2, 2)].powi(2)).sqrt());
    let theta_z = m[(1, 0)].atan2(m[(0, 0)]);

    (theta_x, theta_y, theta_z)
}

/// Composes `Rz(θz) · Ry(θy) · Rx(θx)`, the inverse of [`rotation_to_euler`].
pub fn euler_to_rotation(theta_x: f64, theta_y: f64, theta_z: f64) -> Matrix3<f64> {
    let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), theta_x);
    let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), theta_y);
    let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), theta_z);

    (rz * ry * rx).into_inner()
}

/// Signed torsion angle about the `p2`-`p3` bond in radians, range `(-π, π]`.
pub fn dihedral(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>, p4: &Point3<f64>) -> f64 {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let y = n1.cross(&n2).dot(&normalize(&b2));
    let x = n1.dot(&n2);

    let angle = y.atan2(x);
    if angle <= -PI { angle + 2.0 * PI } else { angle }
}
