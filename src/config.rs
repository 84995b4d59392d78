//! Process-wide writer configuration
//!
//! The middle layer between engine defaults and per-table overrides.
//! Settings accumulate here, either through the fluent setters or by
//! deserializing a (possibly partial) settings document, and are frozen into
//! a [`WriterOptions`] snapshot with [`WriterConfig::to_writer_options`].
//!
//! Setters never validate; the values are copied as given. Deserialized
//! documents are checked, since they come straight from user input.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::data_size::DataSize;
use crate::options::{
    check_bloom_filter_fpp, WriterIdentification, WriterOptions, DEFAULT_BLOOM_FILTER_FPP,
    DEFAULT_DICTIONARY_MAX_MEMORY, DEFAULT_MAX_COMPRESSION_BUFFER_SIZE, DEFAULT_MAX_STRING_STATISTICS_LIMIT,
    DEFAULT_ROW_GROUP_MAX_ROW_COUNT, DEFAULT_STRIPE_MAX_ROW_COUNT, DEFAULT_STRIPE_MAX_SIZE,
    DEFAULT_STRIPE_MIN_SIZE,
};

/// Process-wide ORC writer settings
///
/// Missing fields in a deserialized document fall back to the engine
/// defaults, so `{"stripe_max_size": "128MB"}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    // -------------------------------------------------------------------------
    // File Identification
    // -------------------------------------------------------------------------
    /// Writer signature stamped into the file footer
    pub writer_identification: WriterIdentification,

    // -------------------------------------------------------------------------
    // Stripe / Row Group Layout
    // -------------------------------------------------------------------------
    /// Stripes are not flushed below this size unless the file ends
    pub stripe_min_size: DataSize,

    /// A stripe is flushed once it reaches this size
    pub stripe_max_size: DataSize,

    /// A stripe is flushed once it holds this many rows
    pub stripe_max_row_count: u32,

    /// Rows per row group (granularity of row-group statistics)
    pub row_group_max_row_count: u32,

    // -------------------------------------------------------------------------
    // Memory Limits
    // -------------------------------------------------------------------------
    /// Memory budget for dictionary encoding before falling back to direct
    pub dictionary_max_memory: DataSize,

    /// Longest min/max string kept in column statistics
    pub string_statistics_limit: DataSize,

    /// Working buffer size for the compressor
    pub max_compression_buffer_size: DataSize,

    // -------------------------------------------------------------------------
    // Bloom Filters
    // -------------------------------------------------------------------------
    /// FPP used when a table does not set `orc_bloom_filter_fpp`
    #[serde(deserialize_with = "deserialize_bloom_filter_fpp")]
    pub default_bloom_filter_fpp: f64,
}

fn deserialize_bloom_filter_fpp<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let fpp = f64::deserialize(deserializer)?;
    check_bloom_filter_fpp(fpp).map_err(D::Error::custom)
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            writer_identification: WriterIdentification::Native,
            stripe_min_size: DEFAULT_STRIPE_MIN_SIZE,
            stripe_max_size: DEFAULT_STRIPE_MAX_SIZE,
            stripe_max_row_count: DEFAULT_STRIPE_MAX_ROW_COUNT,
            row_group_max_row_count: DEFAULT_ROW_GROUP_MAX_ROW_COUNT,
            dictionary_max_memory: DEFAULT_DICTIONARY_MAX_MEMORY,
            string_statistics_limit: DEFAULT_MAX_STRING_STATISTICS_LIMIT,
            max_compression_buffer_size: DEFAULT_MAX_COMPRESSION_BUFFER_SIZE,
            default_bloom_filter_fpp: DEFAULT_BLOOM_FILTER_FPP,
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the writer identification mode
    pub fn writer_identification(mut self, writer_identification: WriterIdentification) -> Self {
        self.writer_identification = writer_identification;
        self
    }

    /// Set the minimum stripe size
    pub fn stripe_min_size(mut self, size: DataSize) -> Self {
        self.stripe_min_size = size;
        self
    }

    /// Set the maximum stripe size
    pub fn stripe_max_size(mut self, size: DataSize) -> Self {
        self.stripe_max_size = size;
        self
    }

    /// Set the maximum number of rows per stripe
    pub fn stripe_max_row_count(mut self, count: u32) -> Self {
        self.stripe_max_row_count = count;
        self
    }

    /// Set the maximum number of rows per row group
    pub fn row_group_max_row_count(mut self, count: u32) -> Self {
        self.row_group_max_row_count = count;
        self
    }

    /// Set the dictionary encoding memory budget
    pub fn dictionary_max_memory(mut self, size: DataSize) -> Self {
        self.dictionary_max_memory = size;
        self
    }

    /// Set the string statistics size limit
    pub fn string_statistics_limit(mut self, size: DataSize) -> Self {
        self.string_statistics_limit = size;
        self
    }

    /// Set the compressor buffer size
    pub fn max_compression_buffer_size(mut self, size: DataSize) -> Self {
        self.max_compression_buffer_size = size;
        self
    }

    /// Set the default bloom filter false positive probability
    pub fn default_bloom_filter_fpp(mut self, fpp: f64) -> Self {
        self.default_bloom_filter_fpp = fpp;
        self
    }

    /// Freeze the current settings into a writer options snapshot
    ///
    /// The snapshot starts with no bloom filter columns; those only come
    /// from table properties.
    pub fn to_writer_options(&self) -> WriterOptions {
        let options = WriterOptions::default()
            .with_writer_identification(self.writer_identification)
            .with_stripe_min_size(self.stripe_min_size)
            .with_stripe_max_size(self.stripe_max_size)
            .with_stripe_max_row_count(self.stripe_max_row_count)
            .with_row_group_max_row_count(self.row_group_max_row_count)
            .with_dictionary_max_memory(self.dictionary_max_memory)
            .with_max_string_statistics_limit(self.string_statistics_limit)
            .with_max_compression_buffer_size(self.max_compression_buffer_size)
            .with_default_bloom_filter_fpp(self.default_bloom_filter_fpp);

        tracing::debug!(
            writer_identification = %options.writer_identification(),
            stripe_max_size = %options.stripe_max_size(),
            bloom_filter_fpp = options.bloom_filter_fpp(),
            "built writer options from process config"
        );

        options
    }
}
