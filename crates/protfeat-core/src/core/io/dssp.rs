use crate::core::models::assignment::{AssignmentRecord, AssignmentTable, HBondDescriptor};
use crate::core::models::ids::ResidueKey;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const HEADER_SENTINEL: &str = "RESIDUE";
const MIN_RECORD_LEN: usize = 83;
const MISSING_RESIDUE_COLUMN: usize = 9;

const HBOND_COLUMNS: [(usize, usize); 4] = [(39, 50), (50, 61), (61, 72), (72, 83)];

#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Assignment program '{program}' produced no output: {stderr}")]
    ToolFailed { program: String, stderr: String },
    #[error("Column header row containing '{HEADER_SENTINEL}' not found")]
    MissingHeader,
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: AssignmentParseErrorKind,
    },
}

#[derive(Debug, Error)]
pub enum AssignmentParseErrorKind {
    #[error("Record is too short (must be at least {MIN_RECORD_LEN} chars, got {len})")]
    LineTooShort { len: usize },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Hydrogen-bond field in columns {columns} is not 'offset,energy' (value: '{value}')")]
    InvalidHBond { columns: String, value: String },
}

fn field(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("")
}

fn column_char(line: &str, index: usize) -> char {
    line.as_bytes().get(index).map(|&b| b as char).unwrap_or(' ')
}

fn columns(start: usize, end: usize) -> String {
    format!("{}-{}", start + 1, end)
}

fn parse_int(line: &str, start: usize, end: usize, line_num: usize) -> Result<i64, AssignmentError> {
    let value = field(line, start, end).trim();
    value.parse().map_err(|_| AssignmentError::Parse {
        line: line_num,
        kind: AssignmentParseErrorKind::InvalidInt {
            columns: columns(start, end),
            value: value.into(),
        },
    })
}

fn parse_hbond(
    line: &str,
    start: usize,
    end: usize,
    line_num: usize,
) -> Result<HBondDescriptor, AssignmentError> {
    let raw = field(line, start, end);
    let invalid = || AssignmentError::Parse {
        line: line_num,
        kind: AssignmentParseErrorKind::InvalidHBond {
            columns: columns(start, end),
            value: raw.trim().into(),
        },
    };

    let (offset_str, energy_str) = raw.split_once(',').ok_or_else(invalid)?;
    let offset: i64 = offset_str.trim().parse().map_err(|_| invalid())?;
    let energy: f64 = energy_str.trim().parse().map_err(|_| AssignmentError::Parse {
        line: line_num,
        kind: AssignmentParseErrorKind::InvalidFloat {
            columns: columns(start, end),
            value: energy_str.trim().into(),
        },
    })?;
    Ok(HBondDescriptor::new(offset, energy))
}

fn parse_record(line: &str, line_num: usize) -> Result<AssignmentRecord, AssignmentError> {
    if line.len() < MIN_RECORD_LEN {
        return Err(AssignmentError::Parse {
            line: line_num,
            kind: AssignmentParseErrorKind::LineTooShort { len: line.len() },
        });
    }

    let sequence_number = parse_int(line, 0, 5, line_num)?;
    let residue_number = parse_int(line, 5, 10, line_num)?;
    let chain_id = column_char(line, 11);

    let mut hbonds = [HBondDescriptor::default(); 4];
    for (slot, &(start, end)) in hbonds.iter_mut().zip(HBOND_COLUMNS.iter()) {
        *slot = parse_hbond(line, start, end, line_num)?;
    }

    Ok(AssignmentRecord {
        sequence_number,
        key: ResidueKey::new(chain_id, residue_number as isize),
        symbol: column_char(line, 16),
        bridge_labels: [column_char(line, 23), column_char(line, 24)],
        bridge_partners: [
            parse_int(line, 26, 29, line_num)?,
            parse_int(line, 30, 33, line_num)?,
        ],
        sheet_label: column_char(line, 33),
        hbonds,
    })
}

/// Parses the fixed-column output of the secondary-structure assignment program.
///
/// Lines before the column-header row (second token `RESIDUE`) are ignored,
/// as are blank lines and chain-break rows with no residue number. Any other
/// malformed row fails the whole parse.
#[instrument(level = "debug", skip_all)]
pub fn parse_assignment(text: &str) -> Result<AssignmentTable, AssignmentError> {
    let mut lines = text.lines().enumerate();

    lines
        .by_ref()
        .find(|(_, line)| line.split_whitespace().nth(1) == Some(HEADER_SENTINEL))
        .ok_or(AssignmentError::MissingHeader)?;

    let mut table = AssignmentTable::new();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        if column_char(line, MISSING_RESIDUE_COLUMN) == ' ' {
            continue;
        }
        table.insert(parse_record(line, index + 1)?);
    }

    debug!(records = table.len(), "Parsed assignment records.");
    Ok(table)
}

/// Runs an external secondary-structure assignment program on a structure file.
#[derive(Debug, Clone)]
pub struct DsspRunner {
    executable: PathBuf,
}

impl DsspRunner {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Invokes the program with `structure_path` as its only argument and
    /// returns its standard output.
    ///
    /// Diagnostic output alone is only logged; it is fatal when the program
    /// also printed nothing on standard output.
    pub fn run(&self, structure_path: &Path) -> Result<String, AssignmentError> {
        debug!(program = ?self.executable, input = ?structure_path, "Running assignment program.");
        let output = Command::new(&self.executable).arg(structure_path).output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !stderr.trim().is_empty() {
            warn!(
                program = ?self.executable,
                input = ?structure_path,
                "Assignment program reported: {}",
                stderr.trim()
            );
            if stdout.trim().is_empty() {
                return Err(AssignmentError::ToolFailed {
                    program: self.executable.display().to_string(),
                    stderr: stderr.trim().to_string(),
                });
            }
        }
        Ok(stdout)
    }

    /// Runs the program and parses its output.
    pub fn assign(&self, structure_path: &Path) -> Result<AssignmentTable, AssignmentError> {
        parse_assignment(&self.run(structure_path)?)
    }
}
