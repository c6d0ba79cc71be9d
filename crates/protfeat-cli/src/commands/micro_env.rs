use super::prepare_jobs;
use crate::cli::MicroEnvArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use protfeat::core::io::tables::{FEATURES_FILE_NAME, append_features};
use protfeat::engine::progress::{Progress, ProgressReporter};
use protfeat::workflows::micro_env;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub failed_files: usize,
    pub features: usize,
}

pub fn run(args: &MicroEnvArgs, config: &AppConfig, progress: &CliProgressHandler) -> Result<RunSummary> {
    let files = prepare_jobs(&args.data_dir, &args.input_dir, args.shard)?;
    let output = args.data_dir.join(FEATURES_FILE_NAME);

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let silent = ProgressReporter::new();
    reporter.report(Progress::PhaseStart {
        name: "Micro-environments",
    });
    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });

    let mut summary = RunSummary {
        files: files.len(),
        ..RunSummary::default()
    };
    for path in &files {
        match micro_env::run_file(path, &config.features, &silent) {
            Ok(result) => {
                append_features(&output, &result.features)?;
                info!(
                    "{:?}: {} feature(s), {} pair(s) skipped",
                    path,
                    result.features.len(),
                    result.skipped_pairs
                );
                summary.features += result.features.len();
            }
            Err(e) => {
                warn!("Skipping {:?}: {}", path, e);
                summary.failed_files += 1;
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::Message(format!(
        "{} feature(s) from {} file(s) written to {}",
        summary.features,
        summary.files - summary.failed_files,
        output.display()
    )));

    Ok(summary)
}
