use crate::cli::NullModelArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use protfeat::core::io::tables::{RANDOM_FEATURES_FILE_NAME, append_features};
use protfeat::engine::null_model;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use tracing::info;

pub fn run(args: &NullModelArgs, config: &AppConfig, progress: &CliProgressHandler) -> Result<PathBuf> {
    std::fs::create_dir_all(&args.data_dir)?;
    let output = args.data_dir.join(RANDOM_FEATURES_FILE_NAME);

    let mut rng = match args.seed {
        Some(seed) => {
            info!("Seeding null-model sampler with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let features = null_model::random_features(config.null_model_samples, &mut rng);
    append_features(&output, &features)?;

    progress.finish_with_message(format!(
        "{} random feature(s) written to {}",
        features.len(),
        output.display()
    ));
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CliOverrides, build_config};
    use protfeat::core::io::tables::load_features;

    fn args(dir: &std::path::Path, seed: Option<u64>) -> NullModelArgs {
        NullModelArgs {
            data_dir: dir.to_path_buf(),
            samples: None,
            seed,
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let overrides = CliOverrides {
            dssp_executable: None,
            null_model_samples: Some(25),
        };
        let config = build_config(None, &[], &overrides).unwrap();

        let a = run(&args(first.path(), Some(3)), &config, &CliProgressHandler::hidden()).unwrap();
        let b = run(&args(second.path(), Some(3)), &config, &CliProgressHandler::hidden()).unwrap();

        let a = load_features(&a).unwrap();
        assert_eq!(a.len(), 25);
        assert_eq!(a, load_features(&b).unwrap());
    }

    #[test]
    fn repeated_runs_append() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = CliOverrides {
            dssp_executable: None,
            null_model_samples: Some(4),
        };
        let config = build_config(None, &[], &overrides).unwrap();

        run(&args(dir.path(), None), &config, &CliProgressHandler::hidden()).unwrap();
        let path = run(&args(dir.path(), None), &config, &CliProgressHandler::hidden()).unwrap();
        assert_eq!(load_features(&path).unwrap().len(), 8);
    }
}
