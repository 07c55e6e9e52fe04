//! HTTP Status Code Table
//!
//! The generator draws every status code from a fixed, ordered table of 15
//! codes. The table is split into five contiguous bands of three positions
//! each, in table order:
//!
//! ```text
//! position   0    1    2  |  3    4    5  |  6    7    8  |  9   10   11  | 12   13   14
//! code     100  101  102  | 200  201  202  | 300  301  302  | 400  403  404  | 500  501  502
//! band          1xx       |      2xx       |      3xx       |      4xx       |      5xx
//! ```
//!
//! Band membership comes from the *position* of a code's first occurrence in
//! the table, never from its numeric range. A table holding `404` in the 2xx
//! slot classifies `404` as 2xx.

use std::fmt;
use std::ops::RangeInclusive;

/// Number of codes in each band
pub const BAND_WIDTH: usize = 3;

/// The standard table.
pub const HTTP_CODES: [u16; 15] = [
    100, 101, 102, 200, 201, 202, 300, 301, 302, 400, 403, 404, 500, 501, 502,
];

/// One of the five status code groups, identified by table position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl Band {
    /// Band owning the given table position
    pub fn from_position(position: usize) -> Option<Band> {
        match position / BAND_WIDTH {
            0 => Some(Band::Informational),
            1 => Some(Band::Success),
            2 => Some(Band::Redirection),
            3 => Some(Band::ClientError),
            4 => Some(Band::ServerError),
            _ => None,
        }
    }

    /// Zero-based band index, also the indicator slot in a record
    pub fn index(&self) -> usize {
        match self {
            Band::Informational => 0,
            Band::Success => 1,
            Band::Redirection => 2,
            Band::ClientError => 3,
            Band::ServerError => 4,
        }
    }

    /// First table position of the band
    pub fn start(&self) -> usize {
        self.index() * BAND_WIDTH
    }

    /// Short band label such as `4xx`
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Informational => "1xx",
            Band::Success => "2xx",
            Band::Redirection => "3xx",
            Band::ClientError => "4xx",
            Band::ServerError => "5xx",
        }
    }

    /// Indicator field name used in emitted records
    pub fn indicator_key(&self) -> &'static str {
        match self {
            Band::Informational => "http_1xx",
            Band::Success => "http_2xx",
            Band::Redirection => "http_3xx",
            Band::ClientError => "http_4xx",
            Band::ServerError => "http_5xx",
        }
    }

    /// All bands in table order
    pub fn all() -> [Band; 5] {
        [
            Band::Informational,
            Band::Success,
            Band::Redirection,
            Band::ClientError,
            Band::ServerError,
        ]
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered catalog of status codes with position-based band lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [u16; 15],
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::new(HTTP_CODES)
    }
}

impl CodeTable {
    /// Build a table from 15 codes in band order
    pub fn new(codes: [u16; 15]) -> Self {
        Self { codes }
    }

    /// Code at `band_start + offset`.
    ///
    /// # Panics
    ///
    /// Panics if the position is past the end of the table.
    pub fn code_at(&self, band_start: usize, offset: usize) -> u16 {
        self.codes[band_start + offset]
    }

    /// Band of the first table occurrence of `code`, or `None` if the table
    /// does not contain it.
    pub fn band_of(&self, code: u16) -> Option<Band> {
        self.codes
            .iter()
            .position(|&c| c == code)
            .and_then(Band::from_position)
    }

    /// Table positions belonging to `band`
    pub fn band_range(&self, band: Band) -> RangeInclusive<usize> {
        let start = band.start();
        start..=start + BAND_WIDTH - 1
    }

    /// Number of codes in the table
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// True for a table with no codes
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Codes in table order
    pub fn codes(&self) -> &[u16] {
        &self.codes
    }
}
