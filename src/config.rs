//! Corpus Configuration Module
//!
//! All generation parameters live in [`SampleDataConfig`], a plain struct with
//! public fields. [`SampleDataConfig::default`] carries the constants that
//! produce the standard `httpResponses.json` corpus: four weeks of one-minute
//! buckets for 10 IPs against 5 endpoints.
//!
//! # Sizing
//!
//! ```text
//! records        = num_docs × num_ips × endpoints.len()
//!                = 40320 × 10 × 5 = 2,016,000
//! trigger range  = rand_range_per_entity × num_ips × endpoints.len()
//!                = 4000 × 50 = 200,000
//! ```
//!
//! The trigger range grows with the entity count so each entity sees bursts
//! about as often whatever the corpus width.
//!
//! # Examples
//!
//! ```
//! use http_response_samples::config::SampleDataConfig;
//!
//! let config = SampleDataConfig {
//!     num_docs: 60,
//!     num_ips: 2,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.record_count(), 60 * 2 * 5);
//! ```

use crate::entities;
use crate::error::{Result, SampleError};
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Buckets per corpus: 28 days of one-minute buckets.
pub const DEFAULT_NUM_DOCS: usize = 40_320;

/// Milliseconds between consecutive buckets.
pub const DEFAULT_TIME_INTERVAL: u64 = 60_000;

/// Number of random source IPs.
pub const DEFAULT_NUM_IPS: usize = 10;

/// Timestamp of bucket zero. Dashboards rebase it to the current time, so the
/// absolute value does not matter.
pub const DEFAULT_BASE_TIMESTAMP: u64 = 100_000;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = "httpResponses.json";

/// Table positions `safe_code` is drawn from when no burst is in control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundPool {
    /// Any of the 15 codes, including 4xx and 5xx
    #[default]
    AllBands,
    /// Only the 1xx, 2xx and 3xx bands
    NonErrorBands,
}

impl BackgroundPool {
    /// Table positions covered by this pool
    pub fn positions(&self) -> RangeInclusive<usize> {
        match self {
            BackgroundPool::AllBands => 0..=14,
            BackgroundPool::NonErrorBands => 0..=8,
        }
    }

    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundPool::AllBands => "all",
            BackgroundPool::NonErrorBands => "non-error",
        }
    }
}

/// Configuration for one corpus generation run
#[derive(Debug, Clone)]
pub struct SampleDataConfig {
    /// Number of time buckets per entity
    pub num_docs: usize,
    /// Milliseconds between buckets
    pub time_interval: u64,
    /// Number of random IPs
    pub num_ips: usize,
    /// Endpoint catalog, in emission order
    pub endpoints: Vec<String>,
    /// Timestamp of bucket zero
    pub base_timestamp: u64,
    /// Trigger range contributed by each entity
    pub rand_range_per_entity: u64,
    /// Draw value that starts a 4xx burst
    pub trigger_4xx: u64,
    /// Draw value that starts a 5xx burst
    pub trigger_5xx: u64,
    /// Minimum burst length in buckets
    pub event_length: u32,
    /// Maximum extra buckets added to a burst
    pub event_length_jitter: u32,
    /// A burst bucket falls back to the background code one time in this many
    pub repeat_one_in: u32,
    /// Positions background codes are drawn from
    pub background: BackgroundPool,
    /// RNG seed (None = seeded from OS entropy)
    pub seed: Option<u64>,
    /// Output file
    pub output: PathBuf,
    /// Echo the corpus to stdout after writing
    pub echo_stdout: bool,
}

impl Default for SampleDataConfig {
    fn default() -> Self {
        Self {
            num_docs: DEFAULT_NUM_DOCS,
            time_interval: DEFAULT_TIME_INTERVAL,
            num_ips: DEFAULT_NUM_IPS,
            endpoints: entities::endpoints(),
            base_timestamp: DEFAULT_BASE_TIMESTAMP,
            rand_range_per_entity: 4000,
            trigger_4xx: 4,
            trigger_5xx: 5,
            event_length: 4,
            event_length_jitter: 3,
            repeat_one_in: 5,
            background: BackgroundPool::AllBands,
            seed: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            echo_stdout: true,
        }
    }
}

impl SampleDataConfig {
    /// Number of (IP, endpoint) entities
    pub fn num_entities(&self) -> usize {
        self.num_ips * self.endpoints.len()
    }

    /// Inclusive upper bound of the per-bucket trigger draw
    pub fn rand_range(&self) -> u64 {
        self.rand_range_per_entity
            .saturating_mul(self.num_entities() as u64)
    }

    /// Total number of records the corpus will contain
    pub fn record_count(&self) -> usize {
        self.num_docs * self.num_entities()
    }

    /// Reject configurations that cannot drive the generator
    pub fn validate(&self) -> Result<()> {
        if self.repeat_one_in == 0 {
            return Err(SampleError::InvalidConfig(
                "repeat_one_in must be at least 1".to_string(),
            ));
        }
        if self
            .event_length
            .checked_add(self.event_length_jitter)
            .is_none()
        {
            return Err(SampleError::InvalidConfig(format!(
                "burst length {} + jitter {} overflows",
                self.event_length, self.event_length_jitter
            )));
        }
        if self.time_interval == 0 {
            return Err(SampleError::InvalidConfig(
                "time_interval must be positive".to_string(),
            ));
        }
        if self
            .rand_range_per_entity
            .checked_mul(self.num_entities() as u64)
            .is_none()
        {
            return Err(SampleError::InvalidConfig(format!(
                "trigger range {} x {} entities overflows",
                self.rand_range_per_entity,
                self.num_entities()
            )));
        }
        let last_bucket = self.num_docs.saturating_sub(1) as u64;
        if last_bucket
            .checked_mul(self.time_interval)
            .and_then(|offset| offset.checked_add(self.base_timestamp))
            .is_none()
        {
            return Err(SampleError::InvalidConfig(format!(
                "{} buckets of {} ms from {} overflow the timestamp range",
                self.num_docs, self.time_interval, self.base_timestamp
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SampleDataConfig::default();

        assert_eq!(config.num_docs, 40_320);
        assert_eq!(config.time_interval, 60_000);
        assert_eq!(config.num_ips, 10);
        assert_eq!(config.endpoints.len(), 5);
        assert_eq!(config.base_timestamp, 100_000);
        assert_eq!(config.event_length, 4);
        assert_eq!(config.event_length_jitter, 3);
        assert_eq!(config.repeat_one_in, 5);
        assert_eq!(config.background, BackgroundPool::AllBands);
        assert_eq!(config.seed, None);
        assert_eq!(config.output, PathBuf::from("httpResponses.json"));
        assert!(config.echo_stdout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_sizes() {
        let config = SampleDataConfig::default();

        assert_eq!(config.num_entities(), 50);
        assert_eq!(config.rand_range(), 200_000);
        assert_eq!(config.record_count(), 2_016_000);
    }

    #[test]
    fn test_background_positions() {
        assert_eq!(BackgroundPool::AllBands.positions(), 0..=14);
        assert_eq!(BackgroundPool::NonErrorBands.positions(), 0..=8);
    }

    #[test]
    fn test_validate_rejects_zero_repeat() {
        let config = SampleDataConfig {
            repeat_one_in: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SampleError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = SampleDataConfig {
            time_interval: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_burst_length() {
        let config = SampleDataConfig {
            event_length: u32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SampleError::InvalidConfig(_))
        ));

        let config = SampleDataConfig {
            event_length: u32::MAX - 3,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_range() {
        let config = SampleDataConfig {
            rand_range_per_entity: u64::MAX,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_timestamps() {
        let config = SampleDataConfig {
            time_interval: u64::MAX / 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_corpus_is_valid() {
        let config = SampleDataConfig {
            num_docs: 0,
            num_ips: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.record_count(), 0);
    }
}
