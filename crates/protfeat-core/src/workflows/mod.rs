//! # Workflows Module
//!
//! High-level entry points that tie the `engine` and `core` together.
//!
//! - **Micro-environment Workflow** ([`micro_env`]) - Neighbor pairs and pose features
//!   for every model of a structure
//! - **Secondary-structure Workflow** ([`secondary`]) - Assignment parsing, segmentation
//!   and sheet graphs for one model
//! - **Job Sharding** ([`jobs`]) - Static partition of an input directory across workers

pub mod jobs;
pub mod micro_env;
pub mod secondary;
