//! CLI options.

use std::path::PathBuf;

use clap::{Args, Parser};

pub mod parsers;

#[derive(Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
pub struct Opts {
    /// Sentry DSN
    #[arg(long, env = "SAVINGS_PREDICTOR_SENTRY_DSN")]
    pub sentry_dsn: Option<String>,

    /// Performance monitoring sample rate for Sentry
    #[arg(long, default_value = "0", env = "SAVINGS_PREDICTOR_TRACES_SAMPLE_RATE")]
    pub traces_sample_rate: f32,

    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand)]
pub enum Subcommand {
    Train(TrainOpts),
    Web(WebOpts),
}

/// Fits the savings model on the bundled dataset and writes the artifact
#[derive(Args)]
pub struct TrainOpts {
    /// Artifact output path
    #[arg(short, long, default_value = "model.pkl")]
    pub output: PathBuf,

    /// Share of the records held out from fitting
    #[arg(long, default_value = "0.2", value_parser = parsers::fraction)]
    pub test_size: f64,

    /// Seed of the train/test split
    #[arg(long, default_value = "42")]
    pub seed: u64,
}

/// Serves predictions of a trained model
#[derive(Args)]
pub struct WebOpts {
    /// Trained model artifact
    #[arg(short, long, default_value = "model.pkl", env = "SAVINGS_PREDICTOR_MODEL")]
    pub model: PathBuf,

    /// Web application bind host
    #[arg(long, default_value = "127.0.0.1", env = "SAVINGS_PREDICTOR_HOST")]
    pub host: String,

    /// Web application bind port
    #[arg(short, long, default_value = "5000", env = "SAVINGS_PREDICTOR_PORT")]
    pub port: u16,
}
