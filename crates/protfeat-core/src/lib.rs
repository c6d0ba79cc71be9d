//! # protfeat Core Library
//!
//! Geometric and topological descriptors of protein backbones for statistical
//! modeling: the relative pose of each residue and its nearest non-bonded
//! neighbor, and secondary-structure segments with per-sheet hydrogen-bond
//! graphs.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`,
//!   assignment records, segments, sheet graphs), rigid-body geometry and
//!   file I/O.
//!
//! - **[`engine`]: The Logic Core.** Neighbor search over CA atoms, pose
//!   encoding, segmentation and sheet graph construction, each working on a
//!   single loaded model.
//!
//! - **[`workflows`]: The Public API.** Complete procedures over whole
//!   structure files, plus the static partition of input files across workers.

pub mod core;
pub mod engine;
pub mod workflows;
