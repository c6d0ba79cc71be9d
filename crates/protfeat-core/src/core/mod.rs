//! # Core Module
//!
//! Stateless building blocks shared by the feature engine: the structure data
//! model, rigid-body geometry, random sampling and file I/O.
//!
//! - **Structure model** ([`models`]) - Atoms, residues, chains and per-model systems,
//!   plus assignment records, segments, sheet graphs and feature records
//! - **File I/O** ([`io`]) - Coordinate files, assignment program output and CSV tables
//! - **Utilities** ([`utils`]) - Residue frames, Euler decomposition, torsions and
//!   uniform random directions and rotations

pub mod io;
pub mod models;
pub mod utils;
