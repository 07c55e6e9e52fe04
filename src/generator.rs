use crate::config::SampleDataConfig;
use crate::corpus::{Corpus, CorpusSummary};
use crate::error::Result;
use crate::writer;
use std::io::{self, Write};
use std::time::Instant;
use tracing::info;

/// End-to-end corpus generation: sequences, assembly, rendering, output
#[derive(Debug)]
pub struct SampleDataGenerator {
    config: SampleDataConfig,
}

impl SampleDataGenerator {
    /// Create a new generator with the given configuration
    pub fn new(config: SampleDataConfig) -> Self {
        Self { config }
    }

    /// Generate the corpus, echoing it to stdout when configured
    pub fn generate(&self) -> Result<CorpusSummary> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.generate_to(&mut out)
    }

    /// Generate the corpus, echoing it to `out` when configured
    pub fn generate_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<CorpusSummary> {
        let started = Instant::now();
        info!(
            records = self.config.record_count(),
            output = %self.config.output.display(),
            seed = ?self.config.seed,
            "Generating HTTP response sample data"
        );

        let corpus = Corpus::generate(&self.config)?;
        let summary = corpus.summary();
        info!(%summary, error_rate = summary.error_rate(), "Corpus assembled");

        let buffer = writer::render(corpus.records())?;
        if self.config.echo_stdout {
            writer::echo(out, &buffer)?;
        }
        writer::write_corpus(&self.config.output, &buffer)?;

        info!(
            bytes = buffer.len(),
            elapsed = ?started.elapsed(),
            "Wrote {}",
            self.config.output.display()
        );
        Ok(summary)
    }
}
