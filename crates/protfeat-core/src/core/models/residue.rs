use super::ids::{AtomId, ChainId};
use crate::core::utils::identifiers::is_water_residue;
use std::collections::HashMap;
use std::fmt;

/// Classification of a residue as read from a structure file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidueKind {
    /// A polymer residue from an ATOM record.
    #[default]
    Standard,
    /// A ligand or modified residue from a HETATM record.
    Hetero,
    /// A solvent molecule.
    Water,
}

impl ResidueKind {
    /// Classifies a residue from its record type and residue name.
    pub fn classify(is_hetatm: bool, residue_name: &str) -> Self {
        if is_water_residue(residue_name) {
            ResidueKind::Water
        } else if is_hetatm {
            ResidueKind::Hetero
        } else {
            ResidueKind::Standard
        }
    }
}

impl fmt::Display for ResidueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ResidueKind::Standard => "Standard",
                ResidueKind::Hetero => "Hetero",
                ResidueKind::Water => "Water",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                      // Residue sequence number from source file
    pub name: String,                       // Name of the residue (e.g., "ALA", "HOH")
    pub kind: ResidueKind,                  // Polymer, hetero group or solvent
    pub chain_id: ChainId,                  // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,          // Indices of atoms belonging to this residue
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str, kind: ResidueKind, chain_id: ChainId) -> Self {
        Self {
            number,
            name: name.to_string(),
            kind,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// Solvent and hetero groups are excluded from backbone geometry.
    pub fn is_standard(&self) -> bool {
        self.kind == ResidueKind::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_atom_id(n: u64) -> AtomId {
        AtomId::from(KeyData::from_ffi(n))
    }

    fn dummy_chain_id(n: u64) -> ChainId {
        ChainId::from(KeyData::from_ffi(n))
    }

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let chain_id = dummy_chain_id(1);
        let residue = Residue::new(10, "GLY", ResidueKind::Standard, chain_id);
        assert_eq!(residue.number, 10);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.chain_id, chain_id);
        assert!(residue.is_standard());
        assert!(residue.atoms().is_empty());
        assert!(residue.get_atom_id_by_name("CA").is_none());
    }

    #[test]
    fn add_atom_adds_atom_and_maps_name() {
        let mut residue = Residue::new(5, "ALA", ResidueKind::Standard, dummy_chain_id(2));
        let atom_id = dummy_atom_id(42);
        residue.add_atom("CA", atom_id);
        assert_eq!(residue.atoms(), &[atom_id]);
        assert_eq!(residue.get_atom_id_by_name("CA"), Some(atom_id));
    }

    #[test]
    fn classify_distinguishes_solvent_hetero_and_polymer() {
        assert_eq!(ResidueKind::classify(false, "ALA"), ResidueKind::Standard);
        assert_eq!(ResidueKind::classify(true, "HEM"), ResidueKind::Hetero);
        assert_eq!(ResidueKind::classify(true, "HOH"), ResidueKind::Water);
        assert_eq!(ResidueKind::classify(false, "WAT"), ResidueKind::Water);
    }

    #[test]
    fn hetero_and_water_are_not_standard() {
        let chain_id = dummy_chain_id(3);
        assert!(!Residue::new(1, "HEM", ResidueKind::Hetero, chain_id).is_standard());
        assert!(!Residue::new(2, "HOH", ResidueKind::Water, chain_id).is_standard());
    }
}
