//! Offline model training binary.
//!
//! Synthesizes a dataset, fits the random forest, reports hold-out metrics
//! and predictions for a few reference students, then writes the artifact.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin train-model -- --output model.json --trees 100 --seed 42
//! ```
//!
//! `RUST_LOG` sets the log level (default: info).

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use perf_predictor::artifact::Regressor;
use perf_predictor::models::FeatureVector;
use perf_predictor::training::{reference_profiles, train_artifact, TrainingConfig};

/// Train the student performance model and write it as a JSON artifact
#[derive(Parser, Debug)]
#[command(name = "train-model")]
#[command(about = "Train the student performance model", long_about = None)]
struct Args {
    /// Where to write the model artifact
    #[arg(short, long, default_value = "model.json")]
    output: PathBuf,

    /// Number of synthetic students to generate
    #[arg(long, default_value_t = TrainingConfig::default().n_samples)]
    samples: usize,

    /// Number of trees in the forest
    #[arg(long, default_value_t = TrainingConfig::default().n_estimators)]
    trees: usize,

    /// Maximum depth of each tree
    #[arg(long, default_value_t = TrainingConfig::default().max_depth)]
    max_depth: usize,

    /// Minimum rows a node needs before it may split
    #[arg(long, default_value_t = TrainingConfig::default().min_samples_split)]
    min_samples_split: usize,

    /// Seed for data synthesis, splitting and bootstrapping
    #[arg(long, default_value_t = TrainingConfig::default().seed)]
    seed: u64,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = TrainingConfig::default().test_fraction)]
    test_fraction: f64,
}

impl Args {
    fn training_config(&self) -> TrainingConfig {
        TrainingConfig {
            n_samples: self.samples,
            n_estimators: self.trees,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            test_fraction: self.test_fraction,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = args.training_config();
    info!(?config, "Training model");

    let artifact = train_artifact(&config).context("training failed")?;

    println!("Model performance on hold-out set:");
    println!("  R² score: {:.4}", artifact.metrics.r2);
    println!("  Mean absolute error: {:.2}", artifact.metrics.mae);
    println!(
        "  Train/test rows: {}/{}",
        artifact.metrics.n_train, artifact.metrics.n_test
    );

    println!();
    println!("Reference predictions:");
    for (label, input) in reference_profiles() {
        let features = FeatureVector::ordered(&input, artifact.feature_names())?;
        let score = artifact.predict(features.as_slice())?;
        println!(
            "  {:<40} previous {:>3} -> predicted {:>6.2} ({:+.2})",
            label,
            input.previous_scores,
            score,
            score - input.previous_scores as f64
        );
    }

    artifact
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(model_id = %artifact.model_id, "Model saved to {}", args.output.display());

    Ok(())
}
