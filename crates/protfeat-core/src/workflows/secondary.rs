use crate::core::io::dssp::{DsspRunner, parse_assignment};
use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::MolecularFile;
use crate::core::models::secondary::{Segment, SheetGraph};
use crate::core::models::system::MolecularSystem;
use crate::engine::config::FeatureConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::segments::SegmentBuilder;
use crate::engine::sheet::SheetGraphBuilder;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default)]
pub struct SecondaryStructureResult {
    pub segments: Vec<Segment>,
    /// One graph per sheet label, sorted by label.
    pub sheets: Vec<SheetGraph>,
}

/// Segments a model and builds its sheet graphs from assignment program output.
#[instrument(skip_all, name = "secondary_workflow")]
pub fn run(
    system: &MolecularSystem,
    assignment_text: &str,
    config: &FeatureConfig,
) -> Result<SecondaryStructureResult, EngineError> {
    let table = parse_assignment(assignment_text)?;
    let segments = SegmentBuilder::new(&table).build_system(system)?;
    let sheets = SheetGraphBuilder::new(&table, config.sheet).build(&segments);

    info!(
        segments = segments.len(),
        sheets = sheets.len(),
        "Secondary-structure analysis complete."
    );
    Ok(SecondaryStructureResult { segments, sheets })
}

/// Runs the assignment program on a structure file and analyses its first model.
pub fn run_file(
    path: &Path,
    runner: &DsspRunner,
    config: &FeatureConfig,
    reporter: &ProgressReporter,
) -> Result<SecondaryStructureResult, EngineError> {
    let (structure, _) = PdbFile::read_from_path(path)?;
    let system = structure.models.first().ok_or(EngineError::EmptyStructure)?;

    reporter.report(Progress::Message(format!(
        "Assigning secondary structure for {}",
        path.display()
    )));
    let text = runner.run(path)?;
    run(system, &text, config)
}
