//! Stateless helpers shared by the readers and the feature extractors.
//!
//! - [`geometry`] - Vector normalization, residue frames, Euler decomposition and torsions
//! - [`sampling`] - Random unit vectors and rotations for null-model generation
//! - [`identifiers`] - Residue and atom name classification

pub mod geometry;
pub mod identifiers;
pub mod sampling;
