//! ela - BBOB exploratory landscape analysis pipeline
//!
//! Usage:
//!   ela sample                        # Sample every BBOB problem
//!   ela features                      # Compute all feature classes
//!   ela features ela_meta 10 3        # One (class, dim, fun) job
//!   ela aggregate                     # Build the feature table
//!   ela classify                      # LOPO-CV over all labels
//!   ela classify separability 5 12    # One (label, dim, fun) job
//!   ela report                        # Print mean accuracies
//!   ela dispatch features --dry-run   # Show queue submissions

use bbob_ela::bbob::Suite;
use bbob_ela::config::ExperimentConfig;
use bbob_ela::features::FeatureClass;
use bbob_ela::sampling::SamplingMethod;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;

use commands::{aggregate, classify, dispatch, features, report, sample};
use error::{CliError, Result};

/// ela - BBOB landscape-feature classification pipeline
#[derive(Parser, Debug)]
#[command(name = "ela")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON experiment configuration
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Place every data directory under this root
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sample every problem of the suites
    Sample {
        /// Restrict to one suite
        #[arg(long)]
        suite: Option<Suite>,

        /// Restrict to these dimensions
        #[arg(long, value_delimiter = ',')]
        dims: Option<Vec<usize>>,

        /// Sampling design
        #[arg(long)]
        method: Option<SamplingMethod>,

        /// Sample size per dimension
        #[arg(long)]
        multiplier: Option<usize>,

        /// Sample-set id
        #[arg(long)]
        sample_id: Option<u32>,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compute feature listings; with CLASS DIM FUN only that job
    Features {
        #[arg(requires_all = ["dim", "fun"])]
        class: Option<FeatureClass>,
        dim: Option<usize>,
        fun: Option<u8>,

        /// Dimensions of the full sweep
        #[arg(long, value_delimiter = ',', conflicts_with = "class")]
        dims: Option<Vec<usize>>,
    },

    /// Aggregate feature listings into one table
    Aggregate {
        /// Table dimensions
        #[arg(long, value_delimiter = ',')]
        dims: Option<Vec<usize>>,
    },

    /// LOPO-CV classification; with LABEL DIM FUN only that job
    Classify {
        #[arg(requires_all = ["dim", "fun"])]
        label: Option<String>,
        dim: Option<usize>,
        fun: Option<u8>,

        /// Number of trees in the forest
        #[arg(long)]
        trees: Option<usize>,
    },

    /// Print mean accuracies per label and dimension
    Report,

    /// Submit per-job runs to a batch queue
    Dispatch {
        #[arg(value_enum)]
        target: DispatchTarget,

        /// Only print the submissions
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DispatchTarget {
    Features,
    Classify,
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ExperimentConfig> {
    let mut config = match &cli.config {
        Some(path) => ExperimentConfig::load(path)?,
        None => ExperimentConfig::default(),
    };
    if let Some(root) = &cli.root {
        config = config.with_root(root);
    }
    debug!(
        file = ?cli.config,
        sample_set = %config.sample_set_name(),
        "configuration loaded"
    );
    Ok(config)
}

fn execute(cli: Cli) -> Result<()> {
    let mut config = load_config(&cli)?;

    match cli.command {
        Commands::Sample {
            suite,
            dims,
            method,
            multiplier,
            sample_id,
            seed,
        } => {
            if let Some(method) = method {
                config = config.with_sampling_method(method);
            }
            if let Some(multiplier) = multiplier {
                config = config.with_multiplier(multiplier);
            }
            if let Some(sample_id) = sample_id {
                config = config.with_sample_id(sample_id);
            }
            if seed.is_some() {
                config = config.with_seed(seed);
            }
            config.validate()?;
            sample::run(&config, suite, dims.as_deref())
        }

        Commands::Features {
            class,
            dim,
            fun,
            dims,
        } => match (class, dim, fun) {
            (Some(class), Some(dim), Some(fun)) => features::run_job(&config, class, dim, fun),
            _ => features::run_all(&config, dims.as_deref()),
        },

        Commands::Aggregate { dims } => {
            if let Some(dims) = dims {
                config = config.with_table_dims(&dims);
            }
            aggregate::run(&config)
        }

        Commands::Classify {
            label,
            dim,
            fun,
            trees,
        } => {
            if let Some(trees) = trees {
                config = config.with_n_trees(trees);
            }
            config.validate()?;
            match (label, dim, fun) {
                (Some(label), Some(dim), Some(fun)) => classify::run_job(&config, &label, dim, fun),
                _ => classify::run_all(&config),
            }
        }

        Commands::Report => report::run(&config),

        Commands::Dispatch { target, dry_run } => match target {
            DispatchTarget::Features => dispatch::features(&config, dry_run),
            DispatchTarget::Classify => dispatch::classify(&config, dry_run),
        },

        Commands::Config => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| CliError::Pipeline(e.to_string()))?;
            println!("{json}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}
