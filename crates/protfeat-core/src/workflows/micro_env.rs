use crate::core::io::pdb::PdbFile;
use crate::core::io::traits::MolecularFile;
use crate::core::models::feature::MicroEnvironmentFeature;
use crate::core::models::system::Structure;
use crate::engine::config::FeatureConfig;
use crate::engine::error::EngineError;
use crate::engine::micro_env::MicroEnvironmentEncoder;
use crate::engine::neighbors::NeighborFinder;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Default)]
pub struct MicroEnvironmentResult {
    /// Features of every model, in model order then residue order.
    pub features: Vec<MicroEnvironmentFeature>,
    /// Neighbor pairs dropped because their geometry was unavailable.
    pub skipped_pairs: usize,
}

/// Extracts one feature per non-bonded neighbor pair of every model.
#[instrument(skip_all, name = "micro_env_workflow")]
pub fn run(
    structure: &Structure,
    config: &FeatureConfig,
    reporter: &ProgressReporter,
) -> Result<MicroEnvironmentResult, EngineError> {
    if structure.models.is_empty() {
        return Err(EngineError::EmptyStructure);
    }

    reporter.report(Progress::TaskStart {
        total_steps: structure.models.len() as u64,
    });

    let mut result = MicroEnvironmentResult::default();
    for system in &structure.models {
        let pairs = NeighborFinder::new(system).find_pairs(&config.neighbors);
        let outcome = MicroEnvironmentEncoder::new(system).encode_all(&pairs);

        result.features.extend(outcome.features);
        result.skipped_pairs += outcome.skipped;
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    info!(
        models = structure.models.len(),
        features = result.features.len(),
        skipped = result.skipped_pairs,
        "Micro-environment extraction complete."
    );
    Ok(result)
}

/// Reads a structure file and runs [`run`] on it.
pub fn run_file(
    path: &Path,
    config: &FeatureConfig,
    reporter: &ProgressReporter,
) -> Result<MicroEnvironmentResult, EngineError> {
    let (structure, _) = PdbFile::read_from_path(path)?;
    run(&structure, config, reporter)
}
