use thiserror::Error;

use super::config::ConfigError;
use super::segments::SegmentError;
use crate::core::io::dssp::AssignmentError;
use crate::core::io::pdb::PdbError;
use crate::core::io::tables::TableError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read structure: {source}")]
    Structure {
        #[from]
        source: PdbError,
    },

    #[error("Secondary-structure assignment failed: {source}")]
    Assignment {
        #[from]
        source: AssignmentError,
    },

    #[error("Segmentation failed: {source}")]
    Segment {
        #[from]
        source: SegmentError,
    },

    #[error("Failed to write results: {source}")]
    Table {
        #[from]
        source: TableError,
    },

    #[error("Structure contains no models")]
    EmptyStructure,
}
