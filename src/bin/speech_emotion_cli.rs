use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use speech_emotion::config::{AppConfig, DEFAULT_CONFIG_PATH};
use speech_emotion::dataset::{
    extract_single, train_test_split, Dataset, DatasetBuilder, DatasetConfig, LabelEncoder,
    DEFAULT_SPLIT_SEED, DEFAULT_TEST_FRACTION,
};

#[derive(Parser, Debug)]
#[command(
    name = "speech_emotion_cli",
    about = "Build and inspect speech emotion feature datasets"
)]
struct Cli {
    /// JSON config file (defaults to config/speech_emotion.json)
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract features for every recording under a dataset root
    Build {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Write X.json/y.json after the build
        #[arg(long)]
        persist: bool,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Seed the augmentation random source
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Extract the feature vector of a single recording
    Extract {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Load a persisted dataset and report its label mapping and split sizes
    Inspect {
        #[arg(long)]
        dataset_dir: PathBuf,
        #[arg(long, default_value_t = DEFAULT_TEST_FRACTION)]
        test_size: f64,
        #[arg(long, default_value_t = DEFAULT_SPLIT_SEED)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load_from_file(
        cli.config
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
    );

    match cli.command {
        Commands::Build {
            data_dir,
            persist,
            output_dir,
            seed,
        } => {
            let mut dataset_config = DatasetConfig::from_app_config(&config);
            if let Some(dir) = data_dir {
                dataset_config.root_directory = dir;
            }
            if let Some(dir) = output_dir {
                dataset_config.output_directory = dir;
            }
            if persist {
                dataset_config.persist = true;
            }
            if seed.is_some() {
                dataset_config.augmentation.seed = seed;
            }
            run_build(dataset_config, &config)
        }
        Commands::Extract { file, output } => run_extract(&file, output, &config),
        Commands::Inspect {
            dataset_dir,
            test_size,
            seed,
        } => run_inspect(&dataset_dir, test_size, seed),
    }
}

fn run_build(dataset_config: DatasetConfig, config: &AppConfig) -> Result<ExitCode> {
    let root = dataset_config.root_directory.clone();
    let persisted_to = dataset_config
        .persist
        .then(|| dataset_config.output_directory.display().to_string());

    let mut builder = DatasetBuilder::new(dataset_config, config.features.clone())
        .context("configuring dataset builder")?;
    let dataset = builder
        .build()
        .with_context(|| format!("building dataset from {}", root.display()))?;

    let label_counts: BTreeMap<&str, usize> = dataset
        .label_counts()
        .into_iter()
        .map(|(emotion, count)| (emotion.name(), count))
        .collect();
    let summary = BuildSummary {
        root: root.display().to_string(),
        rows: dataset.len(),
        columns: dataset.n_features(),
        label_counts,
        persisted_to,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(ExitCode::from(0))
}

fn run_extract(file: &Path, output_path: Option<PathBuf>, config: &AppConfig) -> Result<ExitCode> {
    let matrix = extract_single(file, &config.features)
        .with_context(|| format!("extracting features from {}", file.display()))?;

    let report = ExtractReport {
        file: file.display().to_string(),
        rows: matrix.nrows(),
        columns: matrix.ncols(),
        features: matrix.iter().copied().collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }
    Ok(ExitCode::from(0))
}

fn run_inspect(dataset_dir: &Path, test_size: f64, seed: u64) -> Result<ExitCode> {
    let dataset = Dataset::load(dataset_dir)
        .with_context(|| format!("loading dataset from {}", dataset_dir.display()))?;
    let (train, test) = train_test_split(&dataset, test_size, seed)
        .with_context(|| format!("splitting {} rows", dataset.len()))?;
    let encoder = LabelEncoder::fit(train.labels());
    encoder
        .transform(train.labels())
        .context("encoding training labels")?;
    encoder
        .transform(test.labels())
        .context("encoding test labels")?;

    let report = InspectReport {
        rows: dataset.len(),
        features: dataset.n_features(),
        classes: encoder
            .mapping()
            .into_iter()
            .map(|(label, id)| (label.to_string(), id))
            .collect(),
        train_rows: train.len(),
        test_rows: test.len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
struct BuildSummary<'a> {
    root: String,
    rows: usize,
    columns: usize,
    label_counts: BTreeMap<&'a str, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    persisted_to: Option<String>,
}

#[derive(Serialize)]
struct ExtractReport {
    file: String,
    rows: usize,
    columns: usize,
    features: Vec<f32>,
}

#[derive(Serialize)]
struct InspectReport {
    rows: usize,
    features: usize,
    classes: BTreeMap<String, usize>,
    train_rows: usize,
    test_rows: usize,
}
