//! CSV persistence for feature records and secondary-structure tables.
//!
//! Feature files carry no header and are always opened for appending so that
//! several workers can accumulate into the same directory over time.

use crate::core::models::feature::{FEATURE_COLUMNS, MicroEnvironmentFeature};
use crate::core::models::secondary::{Segment, SegmentKind, SheetGraph};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const FEATURES_FILE_NAME: &str = "bb_micro_env_features.csv";
pub const RANDOM_FEATURES_FILE_NAME: &str = "random_micro_env_features.csv";
pub const SEGMENTS_FILE_NAME: &str = "secondary_segments.csv";
pub const SHEET_EDGES_FILE_NAME: &str = "sheet_edges.csv";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to open table file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error in {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

fn open_append(path: &Path) -> Result<File, TableError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Appends rows to a CSV file, writing a header only when the file is new
/// and `with_header` is set.
fn append_rows<T: Serialize>(path: &Path, rows: &[T], with_header: bool) -> Result<(), TableError> {
    let is_new = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);
    let file = open_append(path)?;
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(with_header && is_new)
        .from_writer(file);
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Appends feature records, one headerless ten-column row each.
pub fn append_features(path: &Path, features: &[MicroEnvironmentFeature]) -> Result<(), TableError> {
    let rows: Vec<[f64; FEATURE_COLUMNS]> = features.iter().map(|f| f.to_row()).collect();
    append_rows(path, &rows, false)
}

pub fn load_features(path: &Path) -> Result<Vec<MicroEnvironmentFeature>, TableError> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    reader
        .deserialize::<[f64; FEATURE_COLUMNS]>()
        .map(|row| row.map(MicroEnvironmentFeature::from_row).map_err(csv_err))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRow {
    pub source: String,
    pub chain: char,
    pub kind: String,
    pub label: String,
    pub start: isize,
    pub end: isize,
    pub length: usize,
}

impl SegmentRow {
    pub fn from_segment(source: &str, segment: &Segment) -> Option<Self> {
        let first = segment.residues.first()?;
        let last = segment.residues.last()?;
        let (kind, label) = match segment.kind {
            SegmentKind::Helix => ("helix", String::new()),
            SegmentKind::Strand { sheet_label } => ("strand", sheet_label.to_string()),
            SegmentKind::Loop { class_symbol } => ("loop", class_symbol.to_string()),
        };
        Some(Self {
            source: source.to_string(),
            chain: first.chain_id,
            kind: kind.to_string(),
            label,
            start: first.residue_number,
            end: last.residue_number,
            length: segment.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetEdgeRow {
    pub source: String,
    pub sheet: char,
    pub from: String,
    pub to: String,
    pub kind: String,
}

pub fn append_segments(path: &Path, source: &str, segments: &[Segment]) -> Result<(), TableError> {
    let rows: Vec<SegmentRow> = segments
        .iter()
        .filter_map(|segment| SegmentRow::from_segment(source, segment))
        .collect();
    append_rows(path, &rows, true)
}

pub fn append_sheet_edges(path: &Path, source: &str, sheets: &[SheetGraph]) -> Result<(), TableError> {
    let rows: Vec<SheetEdgeRow> = sheets
        .iter()
        .flat_map(|sheet| {
            sheet.edges().iter().map(move |edge| SheetEdgeRow {
                source: source.to_string(),
                sheet: sheet.sheet_label,
                from: edge.from.to_string(),
                to: edge.to.to_string(),
                kind: edge.kind.to_string(),
            })
        })
        .collect();
    append_rows(path, &rows, true)
}
