//! Writer options
//!
//! The immutable snapshot handed to an ORC file writer. A snapshot is built
//! once per table write and never changes afterwards: every `with_*` call
//! consumes the value and returns a new one.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data_size::{DataSize, DataSizeUnit};
use crate::error::{OptionsError, Result};

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_STRIPE_MIN_SIZE: DataSize = DataSize::of(32, DataSizeUnit::Megabyte);
pub const DEFAULT_STRIPE_MAX_SIZE: DataSize = DataSize::of(64, DataSizeUnit::Megabyte);
pub const DEFAULT_STRIPE_MAX_ROW_COUNT: u32 = 10_000_000;
pub const DEFAULT_ROW_GROUP_MAX_ROW_COUNT: u32 = 10_000;
pub const DEFAULT_DICTIONARY_MAX_MEMORY: DataSize = DataSize::of(16, DataSizeUnit::Megabyte);
pub const DEFAULT_MAX_STRING_STATISTICS_LIMIT: DataSize = DataSize::of_bytes(64);
pub const DEFAULT_MAX_COMPRESSION_BUFFER_SIZE: DataSize = DataSize::of(256, DataSizeUnit::Kilobyte);
pub const DEFAULT_BLOOM_FILTER_FPP: f64 = 0.05;

/// Which writer signature is stamped into file metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriterIdentification {
    /// Files look as if written by the legacy Hive writer, so older readers
    /// apply their compatibility workarounds
    LegacyHiveCompatible,

    /// Files carry this writer's own identification
    #[default]
    Native,
}

impl WriterIdentification {
    pub const fn as_str(self) -> &'static str {
        match self {
            WriterIdentification::LegacyHiveCompatible => "LEGACY_HIVE_COMPATIBLE",
            WriterIdentification::Native => "NATIVE",
        }
    }
}

impl fmt::Display for WriterIdentification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WriterIdentification {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        [WriterIdentification::LegacyHiveCompatible, WriterIdentification::Native]
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| OptionsError::invalid_config_value("writer_identification", s))
    }
}

/// Accept `fpp` only inside the open interval (0.0, 1.0); NaN is rejected
pub(crate) fn check_bloom_filter_fpp(fpp: f64) -> Result<f64> {
    if fpp > 0.0 && fpp < 1.0 {
        Ok(fpp)
    } else {
        Err(OptionsError::OutOfRangeValue)
    }
}

/// Immutable options consumed by the ORC file writer
///
/// ## Invariants
/// - `bloom_filter_fpp` lies in the open interval (0.0, 1.0) whenever it was
///   set through [`WriterOptions::with_bloom_filter_fpp`], table properties
///   or a deserialized `WriterConfig`
/// - Bloom filter column lookups are exact string matches
#[derive(Debug, Clone, PartialEq)]
pub struct WriterOptions {
    writer_identification: WriterIdentification,

    // -------------------------------------------------------------------------
    // Stripe / Row Group Layout
    // -------------------------------------------------------------------------
    stripe_min_size: DataSize,
    stripe_max_size: DataSize,
    stripe_max_row_count: u32,
    row_group_max_row_count: u32,

    // -------------------------------------------------------------------------
    // Memory Limits
    // -------------------------------------------------------------------------
    dictionary_max_memory: DataSize,
    max_string_statistics_limit: DataSize,
    max_compression_buffer_size: DataSize,

    // -------------------------------------------------------------------------
    // Bloom Filters
    // -------------------------------------------------------------------------
    bloom_filter_fpp: f64,
    bloom_filter_columns: BTreeSet<String>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            writer_identification: WriterIdentification::Native,
            stripe_min_size: DEFAULT_STRIPE_MIN_SIZE,                         // 32 MB
            stripe_max_size: DEFAULT_STRIPE_MAX_SIZE,                         // 64 MB
            stripe_max_row_count: DEFAULT_STRIPE_MAX_ROW_COUNT,
            row_group_max_row_count: DEFAULT_ROW_GROUP_MAX_ROW_COUNT,
            dictionary_max_memory: DEFAULT_DICTIONARY_MAX_MEMORY,             // 16 MB
            max_string_statistics_limit: DEFAULT_MAX_STRING_STATISTICS_LIMIT, // 64 B
            max_compression_buffer_size: DEFAULT_MAX_COMPRESSION_BUFFER_SIZE, // 256 kB
            bloom_filter_fpp: DEFAULT_BLOOM_FILTER_FPP,
            bloom_filter_columns: BTreeSet::new(),
        }
    }
}

impl WriterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn writer_identification(&self) -> WriterIdentification {
        self.writer_identification
    }

    pub fn stripe_min_size(&self) -> DataSize {
        self.stripe_min_size
    }

    pub fn stripe_max_size(&self) -> DataSize {
        self.stripe_max_size
    }

    pub fn stripe_max_row_count(&self) -> u32 {
        self.stripe_max_row_count
    }

    pub fn row_group_max_row_count(&self) -> u32 {
        self.row_group_max_row_count
    }

    pub fn dictionary_max_memory(&self) -> DataSize {
        self.dictionary_max_memory
    }

    pub fn max_string_statistics_limit(&self) -> DataSize {
        self.max_string_statistics_limit
    }

    pub fn max_compression_buffer_size(&self) -> DataSize {
        self.max_compression_buffer_size
    }

    pub fn bloom_filter_fpp(&self) -> f64 {
        self.bloom_filter_fpp
    }

    pub fn bloom_filter_columns(&self) -> &BTreeSet<String> {
        &self.bloom_filter_columns
    }

    /// Whether a bloom filter index is built for `column`
    ///
    /// Exact match only: no case folding and no wildcard.
    pub fn is_bloom_filter_column(&self, column: &str) -> bool {
        self.bloom_filter_columns.contains(column)
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    pub fn with_writer_identification(mut self, writer_identification: WriterIdentification) -> Self {
        self.writer_identification = writer_identification;
        self
    }

    pub fn with_stripe_min_size(mut self, size: DataSize) -> Self {
        self.stripe_min_size = size;
        self
    }

    pub fn with_stripe_max_size(mut self, size: DataSize) -> Self {
        self.stripe_max_size = size;
        self
    }

    pub fn with_stripe_max_row_count(mut self, count: u32) -> Self {
        self.stripe_max_row_count = count;
        self
    }

    pub fn with_row_group_max_row_count(mut self, count: u32) -> Self {
        self.row_group_max_row_count = count;
        self
    }

    pub fn with_dictionary_max_memory(mut self, size: DataSize) -> Self {
        self.dictionary_max_memory = size;
        self
    }

    pub fn with_max_string_statistics_limit(mut self, size: DataSize) -> Self {
        self.max_string_statistics_limit = size;
        self
    }

    pub fn with_max_compression_buffer_size(mut self, size: DataSize) -> Self {
        self.max_compression_buffer_size = size;
        self
    }

    /// Override the bloom filter false positive probability
    ///
    /// Fails with [`OptionsError::OutOfRangeValue`] unless `0.0 < fpp < 1.0`.
    /// NaN is rejected as well.
    pub fn with_bloom_filter_fpp(mut self, fpp: f64) -> Result<Self> {
        self.bloom_filter_fpp = check_bloom_filter_fpp(fpp)?;
        Ok(self)
    }

    /// Unchecked variant for the process config layer, whose setters copy
    /// values as given
    pub(crate) fn with_default_bloom_filter_fpp(mut self, fpp: f64) -> Self {
        self.bloom_filter_fpp = fpp;
        self
    }

    /// Replace the set of columns that get a bloom filter index
    pub fn with_bloom_filter_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bloom_filter_columns = columns.into_iter().map(Into::into).collect();
        self
    }
}
