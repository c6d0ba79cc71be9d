//! Reading structures and assignment output, and persisting result tables.
//!
//! Structure files are read through the [`traits::MolecularFile`] interface.
//! The assignment program is driven as an external process and its fixed-column
//! output parsed by [`dssp`]. Result tables are plain CSV files.

pub mod dssp;
pub mod pdb;
pub mod tables;
pub mod traits;
