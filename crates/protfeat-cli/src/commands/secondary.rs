use super::{prepare_jobs, source_name};
use crate::cli::SecondaryArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use protfeat::core::io::dssp::DsspRunner;
use protfeat::core::io::tables::{
    SEGMENTS_FILE_NAME, SHEET_EDGES_FILE_NAME, append_segments, append_sheet_edges,
};
use protfeat::engine::progress::{Progress, ProgressReporter};
use protfeat::workflows::secondary;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub failed_files: usize,
    pub segments: usize,
    pub sheets: usize,
}

pub fn run(args: &SecondaryArgs, config: &AppConfig, progress: &CliProgressHandler) -> Result<RunSummary> {
    let files = prepare_jobs(&args.data_dir, &args.input_dir, args.shard)?;
    let segments_path = args.data_dir.join(SEGMENTS_FILE_NAME);
    let edges_path = args.data_dir.join(SHEET_EDGES_FILE_NAME);
    let runner = DsspRunner::new(&config.dssp_executable);
    info!("Using assignment program {:?}", runner.executable());

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let silent = ProgressReporter::new();
    reporter.report(Progress::PhaseStart {
        name: "Secondary structure",
    });
    reporter.report(Progress::TaskStart {
        total_steps: files.len() as u64,
    });

    let mut summary = RunSummary {
        files: files.len(),
        ..RunSummary::default()
    };
    for path in &files {
        match secondary::run_file(path, &runner, &config.features, &silent) {
            Ok(result) => {
                let source = source_name(path);
                append_segments(&segments_path, &source, &result.segments)?;
                append_sheet_edges(&edges_path, &source, &result.sheets)?;
                info!(
                    "{:?}: {} segment(s), {} sheet(s)",
                    path,
                    result.segments.len(),
                    result.sheets.len()
                );
                summary.segments += result.segments.len();
                summary.sheets += result.sheets.len();
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
        "{} segment(s) and {} sheet(s) written to {}",
        summary.segments,
        summary.sheets,
        args.data_dir.display()
    )));

    Ok(summary)
}
