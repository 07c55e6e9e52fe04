//! Corpus Assembler
//!
//! A [`Corpus`] holds every entity's precomputed code sequence. Records are
//! produced lazily by [`Corpus::records`] in a fixed order: time bucket
//! outermost, then IP, then endpoint.
//!
//! ```text
//! bucket 0: ip0/ep0 ip0/ep1 .. ip0/ep4  ip1/ep0 .. ip9/ep4
//! bucket 1: ip0/ep0 ..
//! ```
//!
//! Random draws happen only in [`Corpus::generate_with`]: IPs first, then
//! one sequence per entity, IP-major. Iterating records is read-only and can
//! be repeated.

use crate::codes::{Band, CodeTable};
use crate::config::SampleDataConfig;
use crate::entities;
use crate::error::Result;
use crate::sequence::{BurstParams, CodeSequenceGenerator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fmt;
use tracing::info;

/// One emitted event. Field order is the serialized key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record<'a> {
    /// Bucket timestamp in milliseconds
    pub timestamp: u64,
    /// Source IP in dotted-quad form
    pub ip: &'a str,
    /// Requested endpoint path
    pub endpoint: &'a str,
    /// Status code as a decimal string
    pub status_code: String,
    /// Band indicators, exactly one of them set for a table code
    pub http_1xx: u8,
    pub http_2xx: u8,
    pub http_3xx: u8,
    pub http_4xx: u8,
    pub http_5xx: u8,
}

impl<'a> Record<'a> {
    /// Build a record, setting the indicator for `band`
    pub fn new(
        timestamp: u64,
        ip: &'a str,
        endpoint: &'a str,
        code: u16,
        band: Option<Band>,
    ) -> Self {
        let flags = indicators(band);
        Self {
            timestamp,
            ip,
            endpoint,
            status_code: code.to_string(),
            http_1xx: flags[0],
            http_2xx: flags[1],
            http_3xx: flags[2],
            http_4xx: flags[3],
            http_5xx: flags[4],
        }
    }

    pub fn indicators(&self) -> [u8; 5] {
        [
            self.http_1xx,
            self.http_2xx,
            self.http_3xx,
            self.http_4xx,
            self.http_5xx,
        ]
    }
}

/// Five 0/1 indicators with a 1 in the slot of `band`
pub fn indicators(band: Option<Band>) -> [u8; 5] {
    let mut flags = [0u8; 5];
    if let Some(band) = band {
        flags[band.index()] = 1;
    }
    flags
}

/// Record and band totals for a corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusSummary {
    /// Total records
    pub records: usize,
    /// (IP, endpoint) pairs
    pub entities: usize,
    /// Buckets per entity
    pub buckets: usize,
    /// Record count per band, indexed by [`Band::index`]
    pub per_band: [usize; 5],
}

impl CorpusSummary {
    /// Records whose code falls in `band`
    pub fn band_count(&self, band: Band) -> usize {
        self.per_band[band.index()]
    }

    /// Share of records in the 4xx and 5xx bands, as a percentage
    pub fn error_rate(&self) -> f64 {
        if self.records > 0 {
            let errors = self.band_count(Band::ClientError) + self.band_count(Band::ServerError);
            errors as f64 / self.records as f64 * 100.0
        } else {
            0.0
        }
    }
}

impl fmt::Display for CorpusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records ({} entities x {} buckets)",
            self.records, self.entities, self.buckets
        )?;
        for band in Band::all() {
            write!(f, ", {}={}", band, self.band_count(band))?;
        }
        Ok(())
    }
}

/// Fully materialized code sequences for every entity
#[derive(Debug, Clone)]
pub struct Corpus {
    table: CodeTable,
    ips: Vec<String>,
    endpoints: Vec<String>,
    /// Indexed `[ip][endpoint][bucket]`
    codes: Vec<Vec<Vec<u16>>>,
    num_docs: usize,
    base_timestamp: u64,
    time_interval: u64,
}

impl Corpus {
    /// Generate a corpus, seeding from `config.seed` or OS entropy
    pub fn generate(config: &SampleDataConfig) -> Result<Self> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::generate_with(config, &mut rng)
    }

    /// Generate a corpus drawing from the given RNG
    pub fn generate_with<R: Rng + ?Sized>(config: &SampleDataConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let table = CodeTable::default();
        let ips = entities::random_ips(config.num_ips, rng);
        let endpoints = config.endpoints.clone();

        info!(
            entities = config.num_entities(),
            buckets = config.num_docs,
            rand_range = config.rand_range(),
            background = config.background.as_str(),
            "Generating code sequences"
        );

        let generator = CodeSequenceGenerator::new(&table, BurstParams::from_config(config));
        let mut codes = Vec::with_capacity(ips.len());
        for _ in &ips {
            let mut per_endpoint = Vec::with_capacity(endpoints.len());
            for _ in &endpoints {
                per_endpoint.push(generator.generate(config.num_docs, rng));
            }
            codes.push(per_endpoint);
        }

        Ok(Self {
            table,
            ips,
            endpoints,
            codes,
            num_docs: config.num_docs,
            base_timestamp: config.base_timestamp,
            time_interval: config.time_interval,
        })
    }

    /// Source IPs in emission order
    pub fn ips(&self) -> &[String] {
        &self.ips
    }

    /// Endpoints in emission order
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Code sequence of one entity
    pub fn sequence(&self, ip_index: usize, endpoint_index: usize) -> &[u16] {
        &self.codes[ip_index][endpoint_index]
    }

    /// Number of records [`Corpus::records`] yields
    pub fn len(&self) -> usize {
        self.num_docs * self.ips.len() * self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Timestamp of the given bucket
    pub fn timestamp_at(&self, bucket: usize) -> u64 {
        self.base_timestamp + bucket as u64 * self.time_interval
    }

    /// Record for one (bucket, ip, endpoint) triple
    pub fn record_at(&self, bucket: usize, ip_index: usize, endpoint_index: usize) -> Record<'_> {
        let code = self.codes[ip_index][endpoint_index][bucket];
        Record::new(
            self.timestamp_at(bucket),
            &self.ips[ip_index],
            &self.endpoints[endpoint_index],
            code,
            self.table.band_of(code),
        )
    }

    /// Lazy iterator over all records in emission order
    pub fn records(&self) -> Records<'_> {
        Records {
            corpus: self,
            position: 0,
        }
    }

    /// Count records per band without building them
    pub fn summary(&self) -> CorpusSummary {
        let mut per_band = [0usize; 5];
        for code in self.codes.iter().flatten().flatten() {
            if let Some(band) = self.table.band_of(*code) {
                per_band[band.index()] += 1;
            }
        }
        CorpusSummary {
            records: self.len(),
            entities: self.ips.len() * self.endpoints.len(),
            buckets: self.num_docs,
            per_band,
        }
    }
}

/// Iterator over a corpus' records, bucket-major
#[derive(Debug, Clone)]
pub struct Records<'a> {
    corpus: &'a Corpus,
    position: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.corpus.len() {
            return None;
        }
        let per_bucket = self.corpus.ips.len() * self.corpus.endpoints.len();
        let bucket = self.position / per_bucket;
        let within = self.position % per_bucket;
        let ip_index = within / self.corpus.endpoints.len();
        let endpoint_index = within % self.corpus.endpoints.len();
        self.position += 1;
        Some(self.corpus.record_at(bucket, ip_index, endpoint_index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.corpus.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn small_config() -> SampleDataConfig {
        SampleDataConfig {
            num_docs: 120,
            num_ips: 3,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn test_record_count() {
        let config = small_config();
        let corpus = Corpus::generate(&config).expect("generation failed");

        assert_eq!(corpus.len(), 120 * 3 * 5);
        assert_eq!(corpus.records().len(), corpus.len());
        assert_eq!(corpus.records().count(), config.record_count());
    }

    #[test]
    fn test_exactly_one_indicator_matching_band() {
        let corpus = Corpus::generate(&small_config()).expect("generation failed");
        let table = CodeTable::default();

        for record in corpus.records() {
            let flags = record.indicators();
            assert_eq!(flags.iter().map(|&f| u32::from(f)).sum::<u32>(), 1);
            let code: u16 = record.status_code.parse().expect("numeric code");
            let band = table.band_of(code).expect("code from table");
            assert_eq!(flags[band.index()], 1);
        }
    }

    #[test]
    fn test_emission_order() {
        let corpus = Corpus::generate(&small_config()).expect("generation failed");
        let records: Vec<Record<'_>> = corpus.records().take(16).collect();

        // First bucket: ip0 x 5 endpoints, then ip1
        for (i, record) in records.iter().take(15).enumerate() {
            assert_eq!(record.timestamp, 100_000);
            assert_eq!(record.ip, corpus.ips()[i / 5]);
            assert_eq!(record.endpoint, corpus.endpoints()[i % 5]);
        }
        // Second bucket starts over at ip0/endpoint1
        assert_eq!(records[15].timestamp, 160_000);
        assert_eq!(records[15].ip, corpus.ips()[0]);
        assert_eq!(records[15].endpoint, "/example/endpoint1");
    }

    #[test]
    fn test_timestamps_per_entity_are_arithmetic() {
        let config = small_config();
        let corpus = Corpus::generate(&config).expect("generation failed");
        let mut series: HashMap<(usize, &str), Vec<u64>> = HashMap::new();

        for (i, record) in corpus.records().enumerate() {
            // key on position as well since IPs may repeat
            let ip_slot = (i / 5) % corpus.ips().len();
            series
                .entry((ip_slot, record.endpoint))
                .or_default()
                .push(record.timestamp);
        }

        assert_eq!(series.len(), 15);
        for timestamps in series.values() {
            assert_eq!(timestamps.len(), config.num_docs);
            assert_eq!(timestamps[0], config.base_timestamp);
            for pair in timestamps.windows(2) {
                assert_eq!(pair[1] - pair[0], config.time_interval);
            }
        }
    }

    #[test]
    fn test_record_matches_sequence() {
        let corpus = Corpus::generate(&small_config()).expect("generation failed");

        let record = corpus.record_at(7, 2, 3);
        assert_eq!(record.status_code, corpus.sequence(2, 3)[7].to_string());
        assert_eq!(record.endpoint, "/example/endpoint4");
        assert_eq!(record.timestamp, 100_000 + 7 * 60_000);
    }

    #[test]
    fn test_same_seed_same_corpus() {
        let a = Corpus::generate(&small_config()).expect("generation failed");
        let b = Corpus::generate(&small_config()).expect("generation failed");

        assert_eq!(a.ips(), b.ips());
        assert!(a.records().eq(b.records()));
    }

    #[test]
    fn test_summary_totals() {
        let corpus = Corpus::generate(&small_config()).expect("generation failed");
        let summary = corpus.summary();

        assert_eq!(summary.records, corpus.len());
        assert_eq!(summary.entities, 15);
        assert_eq!(summary.buckets, 120);
        assert_eq!(summary.per_band.iter().sum::<usize>(), summary.records);

        let mut counted = [0usize; 5];
        for record in corpus.records() {
            for (slot, flag) in record.indicators().iter().enumerate() {
                counted[slot] += usize::from(*flag);
            }
        }
        assert_eq!(counted, summary.per_band);
    }

    #[test]
    fn test_empty_corpus() {
        let config = SampleDataConfig {
            num_ips: 0,
            seed: Some(1),
            ..Default::default()
        };
        let corpus = Corpus::generate(&config).expect("generation failed");

        assert!(corpus.is_empty());
        assert_eq!(corpus.records().next(), None);
        assert_eq!(corpus.summary().error_rate(), 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SampleDataConfig {
            repeat_one_in: 0,
            ..small_config()
        };
        assert!(Corpus::generate(&config).is_err());
    }

    #[test]
    fn test_indicators_helper() {
        assert_eq!(indicators(Some(Band::Informational)), [1, 0, 0, 0, 0]);
        assert_eq!(indicators(Some(Band::ServerError)), [0, 0, 0, 0, 1]);
        assert_eq!(indicators(None), [0, 0, 0, 0, 0]);
    }
}
