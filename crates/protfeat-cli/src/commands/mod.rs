pub mod micro_env;
pub mod null_model;
pub mod secondary;

use crate::cli::ShardArgs;
use crate::error::Result;
use protfeat::workflows::jobs;
use std::path::{Path, PathBuf};
use tracing::info;

/// This worker's share of the input directory, with the output directory created.
pub(crate) fn prepare_jobs(data_dir: &Path, input_dir: &Path, shard: ShardArgs) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(data_dir)?;
    let files = jobs::list_my_jobs(input_dir, shard.workers, shard.worker_index)?;
    info!(
        "Worker {}/{} assigned {} structure file(s) from {:?}",
        shard.worker_index + 1,
        shard.workers,
        files.len(),
        input_dir
    );
    Ok(files)
}

/// File name used to tag rows in the output tables.
pub(crate) fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
