use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const STRUCTURE_EXTENSION: &str = "pdb";

#[derive(Debug, Error)]
pub enum JobError {
    #[error("Worker index {worker_index} is out of range for {total_workers} workers")]
    InvalidPartition {
        total_workers: usize,
        worker_index: usize,
    },
    #[error("Failed to list input directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Structure files of `dir` assigned to one worker.
///
/// Files with the structure extension are sorted by name and dealt out
/// round-robin: the file at position `i` belongs to worker `i % total_workers`.
pub fn list_my_jobs(
    dir: &Path,
    total_workers: usize,
    worker_index: usize,
) -> Result<Vec<PathBuf>, JobError> {
    if total_workers == 0 || worker_index >= total_workers {
        return Err(JobError::InvalidPartition {
            total_workers,
            worker_index,
        });
    }

    let io_err = |source| JobError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == STRUCTURE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();

    let mine: Vec<PathBuf> = files
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % total_workers == worker_index)
        .map(|(_, path)| path)
        .collect();
    debug!(
        worker = worker_index,
        workers = total_workers,
        jobs = mine.len(),
        "Assigned structure files."
    );
    Ok(mine)
}
