use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "protfeat - Backbone micro-environment and secondary-structure descriptors for protein structures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S neighbors.k=6
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract nearest non-bonded neighbor pose features from structure files.
    MicroEnv(MicroEnvArgs),
    /// Segment structures and build beta-sheet hydrogen-bond graphs.
    Secondary(SecondaryArgs),
    /// Generate random features for the null model.
    NullModel(NullModelArgs),
}

/// Static partition of the input directory across independent workers.
#[derive(Args, Debug, Clone, Copy)]
pub struct ShardArgs {
    /// Total number of workers sharing the input directory.
    #[arg(long, default_value_t = 1, value_name = "INT")]
    pub workers: usize,

    /// Zero-based index of this worker.
    #[arg(long, default_value_t = 0, value_name = "INT")]
    pub worker_index: usize,
}

/// Arguments for the `micro-env` subcommand.
#[derive(Args, Debug)]
pub struct MicroEnvArgs {
    /// Directory receiving the feature table.
    #[arg(required = true, value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory containing the input `.pdb` files.
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    #[command(flatten)]
    pub shard: ShardArgs,
}

/// Arguments for the `secondary` subcommand.
#[derive(Args, Debug)]
pub struct SecondaryArgs {
    /// Directory receiving the segment and sheet-edge tables.
    #[arg(required = true, value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Directory containing the input `.pdb` files.
    #[arg(required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Override the secondary-structure assignment executable.
    #[arg(long, value_name = "PATH")]
    pub dssp: Option<PathBuf>,

    #[command(flatten)]
    pub shard: ShardArgs,
}

/// Arguments for the `null-model` subcommand.
#[derive(Args, Debug)]
pub struct NullModelArgs {
    /// Directory receiving the random feature table.
    #[arg(required = true, value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Override the number of random features to draw.
    #[arg(short = 'n', long, value_name = "INT")]
    pub samples: Option<usize>,

    /// Seed for reproducible sampling.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}
