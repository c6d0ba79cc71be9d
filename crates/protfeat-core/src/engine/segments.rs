use crate::core::models::assignment::{AssignmentRecord, AssignmentTable};
use crate::core::models::ids::{ChainId, ResidueKey};
use crate::core::models::secondary::{Segment, SegmentKind};
use crate::core::models::system::MolecularSystem;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("No assignment record for residue {key}")]
    MissingAssignment { key: ResidueKey },
}

/// Collapses an assignment symbol to its segment class. Helix, strand,
/// bridge, 3-10 helix, pi helix and turn keep their symbol; everything else
/// becomes blank.
pub fn assignment_class(symbol: char) -> char {
    match symbol {
        'H' | 'B' | 'E' | 'G' | 'I' | 'T' => symbol,
        _ => ' ',
    }
}

fn is_strand_class(class: char) -> bool {
    matches!(class, 'E' | 'B')
}

fn segment_kind(record: &AssignmentRecord) -> SegmentKind {
    match assignment_class(record.symbol) {
        'H' => SegmentKind::Helix,
        class if is_strand_class(class) => SegmentKind::Strand {
            sheet_label: record.sheet_label,
        },
        class => SegmentKind::Loop {
            class_symbol: class,
        },
    }
}

fn same_segment(a: &AssignmentRecord, b: &AssignmentRecord) -> bool {
    let class = assignment_class(a.symbol);
    class == assignment_class(b.symbol)
        && (!is_strand_class(class) || a.sheet_label == b.sheet_label)
}

/// Splits residue runs into typed segments using their assignment records.
pub struct SegmentBuilder<'a> {
    table: &'a AssignmentTable,
}

impl<'a> SegmentBuilder<'a> {
    pub fn new(table: &'a AssignmentTable) -> Self {
        Self { table }
    }

    fn record(&self, key: &ResidueKey) -> Result<&'a AssignmentRecord, SegmentError> {
        self.table
            .get(key)
            .ok_or(SegmentError::MissingAssignment { key: *key })
    }

    /// Greedily groups an ordered residue list into maximal same-class runs.
    ///
    /// Concatenating the residues of the returned segments gives back `keys`.
    pub fn build(&self, keys: &[ResidueKey]) -> Result<Vec<Segment>, SegmentError> {
        let records = keys
            .iter()
            .map(|key| self.record(key))
            .collect::<Result<Vec<_>, _>>()?;

        let mut segments = Vec::new();
        let mut start = 0;
        while start < records.len() {
            let head = records[start];
            let run = records[start + 1..]
                .iter()
                .take_while(|record| same_segment(head, record))
                .count();
            let end = start + 1 + run;

            segments.push(Segment::new(segment_kind(head), keys[start..end].to_vec()));
            start = end;
        }
        Ok(segments)
    }

    /// Segments of one chain's standard residues, in chain order.
    pub fn build_chain(
        &self,
        system: &MolecularSystem,
        chain_id: ChainId,
    ) -> Result<Vec<Segment>, SegmentError> {
        let Some(chain) = system.chain(chain_id) else {
            return Ok(Vec::new());
        };
        let keys: Vec<ResidueKey> = chain
            .residues()
            .iter()
            .filter(|&&id| system.residue(id).is_some_and(|r| r.is_standard()))
            .filter_map(|&id| system.residue_key(id))
            .collect();
        self.build(&keys)
    }

    /// Segments of every chain of a model, chain by chain.
    #[instrument(skip_all, name = "segment_builder")]
    pub fn build_system(&self, system: &MolecularSystem) -> Result<Vec<Segment>, SegmentError> {
        let mut segments = Vec::new();
        for (chain_id, _) in system.chains_iter() {
            segments.extend(self.build_chain(system, chain_id)?);
        }
        debug!(segments = segments.len(), "Built secondary-structure segments.");
        Ok(segments)
    }
}
