//! # Core Models Module
//!
//! Data structures for the loaded structure and for everything derived from it.
//!
//! ## Key Components
//!
//! - [`ids`] - Arena keys for atoms, residues and chains, and the canonical [`ids::ResidueKey`]
//! - [`atom`], [`residue`], [`chain`], [`system`] - The in-memory structure model
//! - [`feature`] - Backbone micro-environment feature records
//! - [`assignment`] - Per-residue secondary-structure assignment records
//! - [`secondary`] - Typed segments and beta-sheet graphs
//!
//! ## Usage
//!
//! ```ignore
//! use protfeat::core::models::{atom::Atom, residue::ResidueKind, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A');
//! let residue_id = system.add_residue(chain_id, 1, "ALA", ResidueKind::Standard)?;
//! system.add_atom_to_residue(residue_id, Atom::new("CA", residue_id, Point3::origin()))?;
//! ```

pub mod assignment;
pub mod atom;
pub mod chain;
pub mod feature;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod residue;
pub mod secondary;
pub mod system;
