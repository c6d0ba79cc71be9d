//! # Engine Module
//!
//! The feature extractors that operate on a loaded model and parsed
//! assignment records.
//!
//! - **Neighbor search** ([`neighbors`]) - k-d tree over CA atoms with covalent-bond filtering
//! - **Pose encoding** ([`micro_env`]) - Backbone torsions and relative frames of neighbor pairs
//! - **Segmentation** ([`segments`]) - Runs of residues sharing a structural class
//! - **Sheet graphs** ([`sheet`]) - Backbone and hydrogen-bond multigraphs per beta sheet
//! - **Null model** ([`null_model`]) - Random features for background statistics
//! - **Configuration** ([`config`]), **Progress Monitoring** ([`progress`]) and
//!   **Error Handling** ([`error`])

pub mod config;
pub mod error;
pub mod micro_env;
pub mod neighbors;
pub mod null_model;
pub mod progress;
pub mod segments;
pub mod sheet;
