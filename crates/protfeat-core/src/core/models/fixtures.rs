use super::atom::Atom;
use super::ids::ResidueId;
use super::residue::ResidueKind;
use super::system::MolecularSystem;
use crate::core::utils::identifiers::{BACKBONE_C, BACKBONE_CA, BACKBONE_N};
use nalgebra::{Point3, Rotation3, Vector3};

/// Adds a residue with N, CA and C atoms placed around `ca`.
pub fn add_backbone_residue(
    system: &mut MolecularSystem,
    chain: char,
    number: isize,
    kind: ResidueKind,
    ca: Point3<f64>,
) -> ResidueId {
    add_oriented_backbone_residue(system, chain, number, kind, ca, &Rotation3::identity())
}

/// Like [`add_backbone_residue`], with the N and C offsets turned by
/// `orientation` so each residue gets its own frame.
pub fn add_oriented_backbone_residue(
    system: &mut MolecularSystem,
    chain: char,
    number: isize,
    kind: ResidueKind,
    ca: Point3<f64>,
    orientation: &Rotation3<f64>,
) -> ResidueId {
    let chain_id = system.add_chain(chain);
    let name = match kind {
        ResidueKind::Standard => "ALA",
        ResidueKind::Hetero => "LIG",
        ResidueKind::Water => "HOH",
    };
    let residue_id = system.add_residue(chain_id, number, name, kind).unwrap();
    for (atom_name, position) in [
        (BACKBONE_N, ca + orientation * Vector3::new(-0.53, 1.36, 0.0)),
        (BACKBONE_CA, ca),
        (BACKBONE_C, ca + orientation * Vector3::new(1.52, 0.0, 0.0)),
    ] {
        system
            .add_atom_to_residue(residue_id, Atom::new(atom_name, residue_id, position))
            .unwrap();
    }
    residue_id
}

/// A system whose residues carry only a CA atom at the given positions.
pub fn system_with_centers(centers: &[(char, isize, [f64; 3])]) -> MolecularSystem {
    let mut system = MolecularSystem::new();
    for &(chain, number, [x, y, z]) in centers {
        let chain_id = system.add_chain(chain);
        let residue_id = system
            .add_residue(chain_id, number, "ALA", ResidueKind::Standard)
            .unwrap();
        system
            .add_atom_to_residue(
                residue_id,
                Atom::new(BACKBONE_CA, residue_id, Point3::new(x, y, z)),
            )
            .unwrap();
    }
    system
}

/// A single chain of `len` standard residues wound on a loose helix.
///
/// Each residue is turned about z by its helix angle and tilted about x, so
/// no two frames share a basis.
pub fn helical_chain(chain: char, len: usize) -> MolecularSystem {
    let mut system = MolecularSystem::new();
    for i in 0..len {
        let angle = (100.0_f64 * i as f64).to_radians();
        let ca = Point3::new(2.3 * angle.cos(), 2.3 * angle.sin(), 1.5 * i as f64);
        let orientation = Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), 0.3 * (i as f64).sin());
        add_oriented_backbone_residue(
            &mut system,
            chain,
            i as isize + 1,
            ResidueKind::Standard,
            ca,
            &orientation,
        );
    }
    system
}
