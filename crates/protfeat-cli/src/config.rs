use crate::error::{CliError, Result};
use protfeat::engine::config::{self as core_config, FeatureConfig, NeighborPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_DSSP_EXECUTABLE: &str = "mkdssp";
pub const DEFAULT_NULL_MODEL_SAMPLES: usize = 10_000;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
enum FilePolicy {
    LastSurviving,
    ClosestNonBonded,
}

impl From<FilePolicy> for NeighborPolicy {
    fn from(p: FilePolicy) -> Self {
        match p {
            FilePolicy::LastSurviving => NeighborPolicy::LastSurviving,
            FilePolicy::ClosestNonBonded => NeighborPolicy::ClosestNonBonded,
        }
    }
}

impl std::str::FromStr for FilePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "last-surviving" => Ok(FilePolicy::LastSurviving),
            "closest-non-bonded" => Ok(FilePolicy::ClosestNonBonded),
            other => Err(format!(
                "unknown policy '{other}' (expected 'last-surviving' or 'closest-non-bonded')"
            )),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileNeighborConfig {
    k: Option<usize>,
    policy: Option<FilePolicy>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileSheetConfig {
    hbond_energy_limit: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileDsspConfig {
    executable: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileNullModelConfig {
    samples: Option<usize>,
}

/// Every table of the optional TOML configuration file.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct FileConfig {
    neighbors: Option<FileNeighborConfig>,
    sheet: Option<FileSheetConfig>,
    dssp: Option<FileDsspConfig>,
    null_model: Option<FileNullModelConfig>,
}

impl FileConfig {
    fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading configuration from {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::ConfigFile {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::ConfigFile {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

/// Settings resolved from defaults, the configuration file, `--set` values
/// and subcommand flags, in increasing precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub features: FeatureConfig,
    pub dssp_executable: PathBuf,
    pub null_model_samples: usize,
}

/// Subcommand flags that take precedence over every other source.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub dssp_executable: Option<PathBuf>,
    pub null_model_samples: Option<usize>,
}

pub fn build_config(
    config_path: Option<&Path>,
    set_values: &[String],
    overrides: &CliOverrides,
) -> Result<AppConfig> {
    let file_config = match config_path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let mut file_config = apply_set_values(file_config, set_values)?;

    let neighbors = file_config.neighbors.take().unwrap_or_default();
    let sheet = file_config.sheet.take().unwrap_or_default();
    let dssp = file_config.dssp.take().unwrap_or_default();
    let null_model = file_config.null_model.take().unwrap_or_default();

    let mut builder = core_config::FeatureConfigBuilder::new();
    if let Some(k) = neighbors.k {
        builder = builder.neighbor_count(k);
    }
    if let Some(policy) = neighbors.policy {
        builder = builder.neighbor_policy(policy.into());
    }
    if let Some(limit) = sheet.hbond_energy_limit {
        builder = builder.hbond_energy_limit(limit);
    }
    let features = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        features,
        dssp_executable: overrides
            .dssp_executable
            .clone()
            .or(dssp.executable)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DSSP_EXECUTABLE)),
        null_model_samples: overrides
            .null_model_samples
            .or(null_model.samples)
            .unwrap_or(DEFAULT_NULL_MODEL_SAMPLES),
    })
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "neighbors.k" => {
                config.neighbors.get_or_insert_with(Default::default).k =
                    Some(parse_value(key, value, "integer")?);
            }
            "neighbors.policy" => {
                let policy = value
                    .parse::<FilePolicy>()
                    .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))?;
                config.neighbors.get_or_insert_with(Default::default).policy = Some(policy);
            }
            "sheet.hbond-energy-limit" => {
                config
                    .sheet
                    .get_or_insert_with(Default::default)
                    .hbond_energy_limit = Some(parse_value(key, value, "float")?);
            }
            "dssp.executable" => {
                config.dssp.get_or_insert_with(Default::default).executable =
                    Some(PathBuf::from(value));
            }
            "null-model.samples" => {
                config.null_model.get_or_insert_with(Default::default).samples =
                    Some(parse_value(key, value, "integer")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
