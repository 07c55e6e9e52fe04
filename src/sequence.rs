//! Per-Entity Code Sequence Generator
//!
//! Each (IP, endpoint) entity gets its own sequence of status codes, one per
//! time bucket. Most buckets carry a background code drawn uniformly from the
//! configured pool. Rarely, the per-bucket trigger draw hits the 4xx or 5xx
//! trigger value and starts a burst: a code from that band is latched and,
//! for the next few buckets, is emitted four times out of five.
//!
//! # Draw order
//!
//! Every bucket consumes random draws in this fixed order, which is what the
//! scripted tests rely on:
//!
//! ```text
//! 1. trigger      uniform [0, rand_range]
//! 2. background   uniform over the pool positions
//! 3. if trigger == trigger_4xx:  jitter [0, event_length_jitter], latch position [9, 11]
//! 4. if trigger == trigger_5xx:  jitter [0, event_length_jitter], latch position [12, 14]
//! 5. if counter_4xx > 0:         repeat [0, max(repeat_one_in, 1) - 1]
//! 6. if counter_5xx > 0:         repeat [0, max(repeat_one_in, 1) - 1]
//! ```
//!
//! # Overlapping bursts
//!
//! Both counters can be positive at once. Both branches run and both
//! counters decrement, but the 5xx branch assigns last, so its outcome is
//! what the bucket emits.

use crate::codes::{Band, CodeTable};
use crate::config::SampleDataConfig;
use rand::Rng;
use std::ops::RangeInclusive;
use tracing::debug;

/// Source of uniform integer draws.
///
/// Every [`rand::Rng`] is a source; tests substitute a scripted one.
pub trait UniformSource {
    /// Uniform draw from the inclusive range
    fn uniform(&mut self, range: RangeInclusive<u64>) -> u64;
}

impl<R: Rng + ?Sized> UniformSource for R {
    fn uniform(&mut self, range: RangeInclusive<u64>) -> u64 {
        self.gen_range(range)
    }
}

/// Where a bucket's emitted code came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSource {
    /// The background draw
    Background,
    /// The latched 4xx code
    Burst4xx,
    /// The latched 5xx code
    Burst5xx,
}

/// Result of generating one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketOutcome {
    /// Status code emitted for the bucket
    pub code: u16,
    /// Branch that produced `code`
    pub source: CodeSource,
}

/// Burst counters and latched codes carried from one bucket to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstState {
    /// Remaining buckets of the current 4xx burst
    pub counter_4xx: u32,
    /// Remaining buckets of the current 5xx burst
    pub counter_5xx: u32,
    /// Code repeated during a 4xx burst
    pub latched_4xx: u16,
    /// Code repeated during a 5xx burst
    pub latched_5xx: u16,
}

impl BurstState {
    /// Idle state, latched to the first code of each error band
    pub fn new(table: &CodeTable) -> Self {
        Self {
            counter_4xx: 0,
            counter_5xx: 0,
            latched_4xx: table.code_at(Band::ClientError.start(), 0),
            latched_5xx: table.code_at(Band::ServerError.start(), 0),
        }
    }

    /// True while either burst has buckets left
    pub fn in_burst(&self) -> bool {
        self.counter_4xx > 0 || self.counter_5xx > 0
    }
}

/// Parameters of the burst process, fixed for a whole corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurstParams {
    /// Inclusive upper bound of the trigger draw
    pub rand_range: u64,
    /// Trigger value that starts a 4xx burst
    pub trigger_4xx: u64,
    /// Trigger value that starts a 5xx burst
    pub trigger_5xx: u64,
    /// Minimum burst length in buckets
    pub event_length: u32,
    /// Maximum extra buckets added to a burst
    pub event_length_jitter: u32,
    /// A burst bucket falls back to the background code one time in this many
    pub repeat_one_in: u32,
    /// Table positions background codes are drawn from
    pub background: RangeInclusive<usize>,
}

impl BurstParams {
    /// Burst parameters of a corpus configuration
    pub fn from_config(config: &SampleDataConfig) -> Self {
        Self {
            rand_range: config.rand_range(),
            trigger_4xx: config.trigger_4xx,
            trigger_5xx: config.trigger_5xx,
            event_length: config.event_length,
            event_length_jitter: config.event_length_jitter,
            repeat_one_in: config.repeat_one_in,
            background: config.background.positions(),
        }
    }
}

/// Generates status code sequences for single entities
#[derive(Debug, Clone)]
pub struct CodeSequenceGenerator<'a> {
    table: &'a CodeTable,
    params: BurstParams,
}

impl<'a> CodeSequenceGenerator<'a> {
    /// Generator drawing codes from `table`
    pub fn new(table: &'a CodeTable, params: BurstParams) -> Self {
        Self { table, params }
    }

    /// Generate `num_docs` codes for one entity, starting from an idle state
    pub fn generate<S: UniformSource + ?Sized>(&self, num_docs: usize, source: &mut S) -> Vec<u16> {
        let mut state = BurstState::new(self.table);
        (0..num_docs)
            .map(|_| self.step(&mut state, source).code)
            .collect()
    }

    /// Advance one bucket
    pub fn step<S: UniformSource + ?Sized>(
        &self,
        state: &mut BurstState,
        source: &mut S,
    ) -> BucketOutcome {
        let trigger = source.uniform(0..=self.params.rand_range);
        let safe_code = self.draw_code(self.params.background.clone(), source);

        if trigger == self.params.trigger_4xx {
            state.counter_4xx = self.burst_length(source);
            state.latched_4xx = self.draw_code(self.table.band_range(Band::ClientError), source);
            debug!(
                band = "4xx",
                code = state.latched_4xx,
                length = state.counter_4xx,
                "burst started"
            );
        }
        if trigger == self.params.trigger_5xx {
            state.counter_5xx = self.burst_length(source);
            state.latched_5xx = self.draw_code(self.table.band_range(Band::ServerError), source);
            debug!(
                band = "5xx",
                code = state.latched_5xx,
                length = state.counter_5xx,
                "burst started"
            );
        }

        let mut outcome = BucketOutcome {
            code: safe_code,
            source: CodeSource::Background,
        };
        if state.counter_4xx > 0 {
            if self.repeats(source) {
                outcome = BucketOutcome {
                    code: state.latched_4xx,
                    source: CodeSource::Burst4xx,
                };
            } else {
                outcome = BucketOutcome {
                    code: safe_code,
                    source: CodeSource::Background,
                };
            }
            state.counter_4xx -= 1;
        }
        // Checked independently of the 4xx branch: when both bursts are live
        // this assignment wins.
        if state.counter_5xx > 0 {
            if self.repeats(source) {
                outcome = BucketOutcome {
                    code: state.latched_5xx,
                    source: CodeSource::Burst5xx,
                };
            } else {
                outcome = BucketOutcome {
                    code: safe_code,
                    source: CodeSource::Background,
                };
            }
            state.counter_5xx -= 1;
        }
        outcome
    }

    fn draw_code<S: UniformSource + ?Sized>(
        &self,
        positions: RangeInclusive<usize>,
        source: &mut S,
    ) -> u16 {
        let (lo, hi) = positions.into_inner();
        let position = source.uniform(lo as u64..=hi as u64) as usize;
        self.table.codes()[position]
    }

    fn burst_length<S: UniformSource + ?Sized>(&self, source: &mut S) -> u32 {
        let jitter = source.uniform(0..=u64::from(self.params.event_length_jitter));
        // jitter <= event_length_jitter, so it fits in u32
        self.params.event_length.saturating_add(jitter as u32)
    }

    fn repeats<S: UniformSource + ?Sized>(&self, source: &mut S) -> bool {
        // repeat_one_in of 0 behaves like 1: every burst bucket falls back
        source.uniform(0..=u64::from(self.params.repeat_one_in.saturating_sub(1))) != 0
    }
}
