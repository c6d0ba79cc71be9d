use crate::core::io::traits::MolecularFile;
use crate::core::models::atom::Atom;
use crate::core::models::ids::{ChainId, ResidueId};
use crate::core::models::residue::ResidueKind;
use crate::core::models::system::{MolecularSystem, Structure};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::{debug, trace};

const MIN_ATOM_LINE_LEN: usize = 54;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Raw HEADER, TITLE and COMPND records.
    pub header_lines: Vec<String>,
    /// Atom records dropped because they carried an insertion code.
    pub skipped_insertions: usize,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("No ATOM or HETATM records found")]
    NoAtoms,
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM/HETATM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn columns(start: usize, end: usize) -> String {
    format!("{}-{}", start + 1, end)
}

fn parse_int(line: &str, start: usize, end: usize, line_num: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: columns(start, end),
            value: value.into(),
        },
    })
}

fn parse_float(line: &str, start: usize, end: usize, line_num: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: columns(start, end),
            value: value.into(),
        },
    })
}

/// Per-model cursor tracking the chain and residue currently being filled.
#[derive(Default)]
struct ModelCursor {
    system: MolecularSystem,
    current_chain: Option<(char, ChainId)>,
    current_residue: Option<(isize, ResidueId)>,
}

impl ModelCursor {
    fn is_empty(&self) -> bool {
        self.system.atom_count() == 0
    }
}

/// Reader for the fixed-column PDB format.
///
/// Only ATOM, HETATM, MODEL and ENDMDL records are interpreted. The first
/// alternate location of each atom wins, and residues with insertion codes
/// are skipped because the canonical residue key carries no insertion code.
pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut metadata = PdbMetadata::default();
        let mut models: Vec<MolecularSystem> = Vec::new();
        let mut cursor = ModelCursor::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "HEADER" | "TITLE" | "COMPND" => metadata.header_lines.push(line.clone()),
                "MODEL" | "ENDMDL" => {
                    if !cursor.is_empty() {
                        models.push(std::mem::take(&mut cursor).system);
                    }
                }
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_LINE_LEN {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }
                    if !slice_and_trim(&line, 26, 27).is_empty() {
                        trace!(line = line_num, "Skipping atom with insertion code.");
                        metadata.skipped_insertions += 1;
                        continue;
                    }
                    read_atom_record(&line, line_num, record_type == "HETATM", &mut cursor)?;
                }
                _ => {}
            }
        }

        if !cursor.is_empty() {
            models.push(cursor.system);
        }
        if models.is_empty() {
            return Err(PdbError::NoAtoms);
        }

        debug!(
            models = models.len(),
            atoms = models[0].atom_count(),
            "Parsed PDB structure."
        );
        Ok((Structure::new(models), metadata))
    }
}

fn read_atom_record(
    line: &str,
    line_num: usize,
    is_hetatm: bool,
    cursor: &mut ModelCursor,
) -> Result<(), PdbError> {
    let name = slice_and_trim(line, 12, 16);
    if name.is_empty() {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::MissingRequiredField {
                columns: columns(12, 16),
            },
        });
    }
    let serial = parse_int(line, 6, 11, line_num)?;
    let residue_name = slice_and_trim(line, 17, 20);
    let chain_char = line.get(21..22).and_then(|s| s.chars().next()).unwrap_or(' ');
    let residue_number = parse_int(line, 22, 26, line_num)?;
    let x = parse_float(line, 30, 38, line_num)?;
    let y = parse_float(line, 38, 46, line_num)?;
    let z = parse_float(line, 46, 54, line_num)?;
    let element = slice_and_trim(line, 76, 78);

    let chain_id = match cursor.current_chain {
        Some((id, chain_id)) if id == chain_char => chain_id,
        _ => {
            let chain_id = cursor.system.add_chain(chain_char);
            cursor.current_chain = Some((chain_char, chain_id));
            cursor.current_residue = None;
            chain_id
        }
    };

    let residue_id = match cursor.current_residue {
        Some((number, residue_id)) if number == residue_number => residue_id,
        _ => {
            let kind = ResidueKind::classify(is_hetatm, residue_name);
            let Some(residue_id) =
                cursor
                    .system
                    .add_residue(chain_id, residue_number, residue_name, kind)
            else {
                return Ok(());
            };
            cursor.current_residue = Some((residue_number, residue_id));
            residue_id
        }
    };

    let already_present = cursor
        .system
        .residue(residue_id)
        .is_some_and(|r| r.get_atom_id_by_name(name).is_some());
    if already_present {
        trace!(line = line_num, atom = name, "Skipping alternate location.");
        return Ok(());
    }

    let mut atom = Atom::new(name, residue_id, Point3::new(x, y, z));
    atom.serial = serial.max(0) as usize;
    atom.element = element.to_string();
    cursor.system.add_atom_to_residue(residue_id, atom);
    Ok(())
}
