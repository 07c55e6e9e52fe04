#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Pipeline
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌─────────────────┐   ┌────────────┐   ┌──────────┐
//! │ CodeTable  │──▶│   entities   │──▶│ CodeSequence    │──▶│   Corpus   │──▶│  writer  │
//! │ 15 codes,  │   │ random IPs,  │   │ Generator       │   │ bucket ▸ ip│   │ NDJSON,  │
//! │ 5 bands    │   │ 5 endpoints  │   │ one per entity  │   │ ▸ endpoint │   │ file+out │
//! └────────────┘   └──────────────┘   └─────────────────┘   └────────────┘   └──────────┘
//! ```
//!
//! | Module | Role |
//! |--------|------|
//! | [`codes`] | Status code table and position-based band lookup |
//! | [`entities`] | Endpoint catalog and random IPv4-like addresses |
//! | [`sequence`] | Per-entity code sequences with 4xx/5xx bursts |
//! | [`corpus`] | Precomputed sequences and the ordered record stream |
//! | [`writer`] | Newline-delimited JSON rendering, file write and echo |
//! | [`generator`] | The whole run, from config to file |
//!
//! ## Generating a small corpus in memory
//!
//! ```rust
//! use http_response_samples::config::SampleDataConfig;
//! use http_response_samples::corpus::Corpus;
//! use http_response_samples::writer;
//!
//! let config = SampleDataConfig {
//!     num_docs: 3,
//!     num_ips: 2,
//!     seed: Some(1),
//!     ..Default::default()
//! };
//! let corpus = Corpus::generate(&config).unwrap();
//! assert_eq!(corpus.records().len(), 3 * 2 * 5);
//!
//! let buffer = writer::render(corpus.records()).unwrap();
//! let text = String::from_utf8(buffer).unwrap();
//! assert_eq!(text.lines().count(), 30);
//! ```

pub mod codes;
pub mod config;
pub mod corpus;
pub mod entities;
pub mod error;
pub mod generator;
pub mod sequence;
pub mod writer;

pub use codes::{Band, CodeTable};
pub use config::{BackgroundPool, SampleDataConfig};
pub use corpus::{Corpus, CorpusSummary, Record};
pub use error::{Result, SampleError};
pub use generator::SampleDataGenerator;
