use clap::{Parser, ValueEnum};
use http_response_samples::config::{
    DEFAULT_BASE_TIMESTAMP, DEFAULT_NUM_DOCS, DEFAULT_NUM_IPS, DEFAULT_OUTPUT,
    DEFAULT_TIME_INTERVAL,
};
use http_response_samples::{BackgroundPool, SampleDataConfig, SampleDataGenerator};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Background code pool choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Background {
    /// Any code in the table
    All,
    /// Only 1xx, 2xx and 3xx codes
    NonError,
}

impl From<Background> for BackgroundPool {
    fn from(background: Background) -> Self {
        match background {
            Background::All => BackgroundPool::AllBands,
            Background::NonError => BackgroundPool::NonErrorBands,
        }
    }
}

/// HTTP response sample data generator for anomaly detection dashboards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Time buckets per (IP, endpoint) entity
    #[arg(long, default_value_t = DEFAULT_NUM_DOCS)]
    docs: usize,

    /// Milliseconds between buckets
    #[arg(long, default_value_t = DEFAULT_TIME_INTERVAL)]
    interval: u64,

    /// Number of random source IPs
    #[arg(long, default_value_t = DEFAULT_NUM_IPS)]
    ips: usize,

    /// Timestamp of the first bucket
    #[arg(long, default_value_t = DEFAULT_BASE_TIMESTAMP)]
    base_timestamp: u64,

    /// Seed for a reproducible corpus (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Pool background codes are drawn from
    #[arg(long, value_enum, default_value = "all")]
    background: Background,

    /// Do not print the corpus to stdout
    #[arg(long)]
    no_echo: bool,
}

impl Args {
    fn into_config(self) -> SampleDataConfig {
        SampleDataConfig {
            num_docs: self.docs,
            time_interval: self.interval,
            num_ips: self.ips,
            base_timestamp: self.base_timestamp,
            seed: self.seed,
            background: self.background.into(),
            output: self.output,
            echo_stdout: !self.no_echo,
            ..Default::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr, stdout carries the corpus
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let generator = SampleDataGenerator::new(args.into_config());

    match generator.generate() {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Error generating sample data: {e}");
            Err(e.into())
        }
    }
}
