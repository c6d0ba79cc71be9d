use crate::core::models::feature::MicroEnvironmentFeature;
use crate::core::models::ids::{ResidueId, ResidueKey};
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::{dihedral, residue_frame, rotation_to_euler};
use crate::core::utils::identifiers::{BACKBONE_C, BACKBONE_CA, BACKBONE_N};
use crate::engine::neighbors::NeighborPair;
use nalgebra::Point3;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnavailableReason {
    MissingAtom(&'static str),
    /// No residue at this sequence offset in the same chain.
    MissingAdjacent { offset: isize },
    /// The adjacent residue is a hetero group or solvent.
    NonStandardAdjacent { offset: isize },
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAtom(name) => write!(f, "missing backbone atom {name}"),
            Self::MissingAdjacent { offset } => write!(f, "no residue at offset {offset:+}"),
            Self::NonStandardAdjacent { offset } => {
                write!(f, "residue at offset {offset:+} is not a standard residue")
            }
        }
    }
}

/// A residue pair could not be encoded. The pair is skipped, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryUnavailable {
    #[error("Residue {0:?} is not part of the system")]
    UnknownResidue(ResidueId),
    #[error("Geometry unavailable for residue {key}: {reason}")]
    Residue {
        key: ResidueKey,
        reason: UnavailableReason,
    },
}

impl GeometryUnavailable {
    /// The residue the failure is attributed to, when it is part of the system.
    pub fn key(&self) -> Option<ResidueKey> {
        match self {
            Self::UnknownResidue(_) => None,
            Self::Residue { key, .. } => Some(*key),
        }
    }

    pub fn reason(&self) -> Option<UnavailableReason> {
        match self {
            Self::UnknownResidue(_) => None,
            Self::Residue { reason, .. } => Some(*reason),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EncodingOutcome {
    pub features: Vec<MicroEnvironmentFeature>,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy)]
struct Backbone {
    n: Point3<f64>,
    ca: Point3<f64>,
    c: Point3<f64>,
}

/// Encodes the relative pose of neighboring residues of one model.
pub struct MicroEnvironmentEncoder<'a> {
    system: &'a MolecularSystem,
}

impl<'a> MicroEnvironmentEncoder<'a> {
    pub fn new(system: &'a MolecularSystem) -> Self {
        Self { system }
    }

    fn key_of(&self, residue_id: ResidueId) -> Result<ResidueKey, GeometryUnavailable> {
        self.system
            .residue_key(residue_id)
            .ok_or(GeometryUnavailable::UnknownResidue(residue_id))
    }

    fn atom(
        &self,
        residue_id: ResidueId,
        key: ResidueKey,
        name: &'static str,
    ) -> Result<Point3<f64>, GeometryUnavailable> {
        self.system
            .atom_position(residue_id, name)
            .ok_or(GeometryUnavailable::Residue {
                key,
                reason: UnavailableReason::MissingAtom(name),
            })
    }

    fn backbone(&self, residue_id: ResidueId, key: ResidueKey) -> Result<Backbone, GeometryUnavailable> {
        Ok(Backbone {
            n: self.atom(residue_id, key, BACKBONE_N)?,
            ca: self.atom(residue_id, key, BACKBONE_CA)?,
            c: self.atom(residue_id, key, BACKBONE_C)?,
        })
    }

    /// The standard residue at `offset` along the same chain.
    fn adjacent(
        &self,
        residue_id: ResidueId,
        key: ResidueKey,
        offset: isize,
    ) -> Result<ResidueId, GeometryUnavailable> {
        let residue = self
            .system
            .residue(residue_id)
            .ok_or(GeometryUnavailable::UnknownResidue(residue_id))?;
        let adjacent_id = self
            .system
            .find_residue_by_id(residue.chain_id, residue.number + offset)
            .ok_or(GeometryUnavailable::Residue {
                key,
                reason: UnavailableReason::MissingAdjacent { offset },
            })?;

        match self.system.residue(adjacent_id) {
            Some(adjacent) if adjacent.is_standard() => Ok(adjacent_id),
            _ => Err(GeometryUnavailable::Residue {
                key,
                reason: UnavailableReason::NonStandardAdjacent { offset },
            }),
        }
    }

    /// Backbone torsions `(phi, psi)` of a residue.
    pub fn torsions(&self, residue_id: ResidueId) -> Result<(f64, f64), GeometryUnavailable> {
        let key = self.key_of(residue_id)?;
        let own = self.backbone(residue_id, key)?;

        let previous = self.adjacent(residue_id, key, -1)?;
        let next = self.adjacent(residue_id, key, 1)?;
        let previous_c = self.atom(previous, key, BACKBONE_C)?;
        let next_n = self.atom(next, key, BACKBONE_N)?;

        let phi = dihedral(&previous_c, &own.n, &own.ca, &own.c);
        let psi = dihedral(&own.n, &own.ca, &own.c, &next_n);
        Ok((phi, psi))
    }

    /// Encodes one pair: torsions of both residues, the CA-to-CA shift in the
    /// first residue's frame and the Euler angles of the relative rotation.
    pub fn encode_pair(&self, pair: &NeighborPair) -> Result<MicroEnvironmentFeature, GeometryUnavailable> {
        let (phi1, psi1) = self.torsions(pair.query)?;
        let (phi2, psi2) = self.torsions(pair.neighbor)?;

        let first = self.backbone(pair.query, self.key_of(pair.query)?)?;
        let second = self.backbone(pair.neighbor, self.key_of(pair.neighbor)?)?;

        let frame1 = residue_frame(&first.n, &first.ca, &first.c);
        let frame2 = residue_frame(&second.n, &second.ca, &second.c);

        let shift = frame1.to_local(&(second.ca - first.ca));
        let (theta_x, theta_y, theta_z) = rotation_to_euler(&frame1.relative_rotation(&frame2));

        Ok(MicroEnvironmentFeature {
            phi1,
            psi1,
            phi2,
            psi2,
            shift,
            theta_x,
            theta_y,
            theta_z,
        })
    }

    /// Encodes every pair in order, skipping the ones whose geometry is
    /// unavailable.
    #[instrument(skip_all, name = "micro_env_encoding", fields(pairs = pairs.len()))]
    pub fn encode_all(&self, pairs: &[NeighborPair]) -> EncodingOutcome {
        let mut outcome = EncodingOutcome {
            features: Vec::with_capacity(pairs.len()),
            skipped: 0,
        };
        for pair in pairs {
            match self.encode_pair(pair) {
                Ok(feature) => outcome.features.push(feature),
                Err(e) => {
                    debug!("Skipping pair: {}", e);
                    outcome.skipped += 1;
                }
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::fixtures::{add_backbone_residue, helical_chain};
    use crate::core::models::residue::ResidueKind;
    use crate::core::utils::geometry::{ResidueFrame, euler_to_rotation};
    use nalgebra::{Isometry3, Matrix3, Translation3, UnitQuaternion, Vector3};
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn id(system: &MolecularSystem, chain: char, number: isize) -> ResidueId {
        system.find_residue_by_key(ResidueKey::new(chain, number)).unwrap()
    }

    fn pair(system: &MolecularSystem, a: isize, b: isize) -> NeighborPair {
        NeighborPair {
            query: id(system, 'A', a),
            neighbor: id(system, 'A', b),
        }
    }

    fn transformed(system: &MolecularSystem, iso: &Isometry3<f64>) -> MolecularSystem {
        let mut copy = MolecularSystem::new();
        for (residue_id, residue) in system.residues_iter() {
            let key = system.residue_key(residue_id).unwrap();
            let chain_id = copy.add_chain(key.chain_id);
            let new_id = copy
                .add_residue(chain_id, residue.number, &residue.name, residue.kind)
                .unwrap();
            for &atom_id in residue.atoms() {
                let atom = system.atom(atom_id).unwrap();
                copy.add_atom_to_residue(
                    new_id,
                    Atom::new(&atom.name, new_id, iso.transform_point(&atom.position)),
                )
                .unwrap();
            }
        }
        copy
    }

    #[test]
    fn torsions_lie_in_half_open_range() {
        let system = helical_chain('A', 8);
        let encoder = MicroEnvironmentEncoder::new(&system);
        for number in 2..=7 {
            let (phi, psi) = encoder.torsions(id(&system, 'A', number)).unwrap();
            assert!(phi > -PI && phi <= PI);
            assert!(psi > -PI && psi <= PI);
        }
    }

    fn frame_of(system: &MolecularSystem, residue_id: ResidueId) -> ResidueFrame {
        residue_frame(
            &system.atom_position(residue_id, BACKBONE_N).unwrap(),
            &system.atom_position(residue_id, BACKBONE_CA).unwrap(),
            &system.atom_position(residue_id, BACKBONE_C).unwrap(),
        )
    }

    #[test]
    fn encoded_pose_reconstructs_the_neighbor() {
        let system = helical_chain('A', 12);
        let encoder = MicroEnvironmentEncoder::new(&system);
        let p = pair(&system, 3, 9);
        let feature = encoder.encode_pair(&p).unwrap();

        let frame1 = frame_of(&system, p.query);
        let frame2 = frame_of(&system, p.neighbor);

        let rebuilt_ca2 = frame1.origin + frame1.basis * feature.shift;
        assert!((rebuilt_ca2 - frame2.origin).norm() < TOLERANCE);

        let rotation = euler_to_rotation(feature.theta_x, feature.theta_y, feature.theta_z);
        let rebuilt_basis: Matrix3<f64> = frame1.basis * rotation;
        assert!((rebuilt_basis - frame2.basis).norm() < 1e-8);
    }

    #[test]
    fn relative_pose_is_expressed_in_the_query_frame() {
        let system = helical_chain('A', 12);
        let encoder = MicroEnvironmentEncoder::new(&system);
        let p = pair(&system, 3, 9);
        let feature = encoder.encode_pair(&p).unwrap();

        let frame1 = frame_of(&system, p.query);
        let frame2 = frame_of(&system, p.neighbor);

        for theta in [feature.theta_x, feature.theta_y, feature.theta_z] {
            assert!(theta.abs() > 0.1, "angle {theta} is too close to zero");
        }

        let rotation = euler_to_rotation(feature.theta_x, feature.theta_y, feature.theta_z);
        assert!((frame1.relative_rotation(&frame2) - rotation).norm() < 1e-8);
        let swapped = frame2.basis.transpose() * frame1.basis;
        assert!((swapped - rotation).norm() > 0.1);

        let displacement = frame2.origin - frame1.origin;
        assert!((frame1.to_local(&displacement) - feature.shift).norm() < TOLERANCE);
        assert!((frame2.to_local(&displacement) - feature.shift).norm() > 0.1);
    }

    #[test]
    fn features_are_invariant_under_rigid_motion() {
        let system = helical_chain('A', 10);
        let iso = Isometry3::from_parts(
            Translation3::new(12.0, -7.5, 3.25),
            UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 1.1)
                * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -0.4),
        );
        let moved = transformed(&system, &iso);

        let before = MicroEnvironmentEncoder::new(&system)
            .encode_pair(&pair(&system, 2, 7))
            .unwrap();
        let after = MicroEnvironmentEncoder::new(&moved)
            .encode_pair(&pair(&moved, 2, 7))
            .unwrap();

        for (a, b) in before.to_row().iter().zip(after.to_row().iter()) {
            assert!((a - b).abs() < 1e-8, "{a} != {b}");
        }
    }

    #[test]
    fn chain_termini_are_skipped() {
        let system = helical_chain('A', 6);
        let encoder = MicroEnvironmentEncoder::new(&system);

        assert_eq!(
            encoder.encode_pair(&pair(&system, 1, 4)).unwrap_err(),
            GeometryUnavailable::Residue {
                key: ResidueKey::new('A', 1),
                reason: UnavailableReason::MissingAdjacent { offset: -1 },
            }
        );
        assert_eq!(
            encoder.encode_pair(&pair(&system, 3, 6)).unwrap_err(),
            GeometryUnavailable::Residue {
                key: ResidueKey::new('A', 6),
                reason: UnavailableReason::MissingAdjacent { offset: 1 },
            }
        );
    }

    #[test]
    fn hetero_neighbors_block_torsions() {
        let mut system = helical_chain('A', 5);
        add_backbone_residue(
            &mut system,
            'A',
            6,
            ResidueKind::Hetero,
            nalgebra::Point3::new(0.0, 0.0, 9.0),
        );
        let encoder = MicroEnvironmentEncoder::new(&system);
        assert_eq!(
            encoder.torsions(id(&system, 'A', 5)).unwrap_err().reason(),
            Some(UnavailableReason::NonStandardAdjacent { offset: 1 })
        );
    }

    #[test]
    fn unknown_residues_carry_no_key() {
        let system = helical_chain('A', 4);
        let encoder = MicroEnvironmentEncoder::new(&system);
        let missing = ResidueId::default();

        let err = encoder.torsions(missing).unwrap_err();
        assert_eq!(err, GeometryUnavailable::UnknownResidue(missing));
        assert_eq!(err.key(), None);
        assert_eq!(err.reason(), None);
        assert!(err.to_string().contains("not part of the system"));

        let outcome = encoder.encode_all(&[NeighborPair {
            query: id(&system, 'A', 2),
            neighbor: missing,
        }]);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn encode_all_counts_skipped_pairs() {
        let system = helical_chain('A', 8);
        let encoder = MicroEnvironmentEncoder::new(&system);
        let pairs = [pair(&system, 2, 6), pair(&system, 1, 5), pair(&system, 6, 2)];

        let outcome = encoder.encode_all(&pairs);
        assert_eq!(outcome.features.len(), 2);
        assert_eq!(outcome.skipped, 1);
        assert!(f64_approx_equal(outcome.features[0].phi1, outcome.features[1].phi2));
        assert!(f64_approx_equal(outcome.features[0].psi2, outcome.features[1].psi1));
    }
}
