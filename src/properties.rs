//! Table property overrides
//!
//! Tables may carry two string properties that tune bloom filters for that
//! table only:
//!
//! ```text
//! orc_bloom_filter_columns = "column_a, column_b"   comma separated names
//! orc_bloom_filter_fpp     = "0.01"                 decimal in (0.0, 1.0)
//! ```
//!
//! [`resolve_writer_options`] applies them on top of a base snapshot. Every
//! other option is inherited from the base untouched, and a malformed
//! property fails the whole resolution.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::BuildHasher;

use crate::error::{OptionsError, Result};
use crate::options::{check_bloom_filter_fpp, WriterOptions};

pub const ORC_BLOOM_FILTER_COLUMNS_KEY: &str = "orc_bloom_filter_columns";
pub const ORC_BLOOM_FILTER_FPP_KEY: &str = "orc_bloom_filter_fpp";

/// Read-only lookup of table-level string properties
pub trait TableProperties {
    fn property(&self, key: &str) -> Option<&str>;
}

impl<S: BuildHasher> TableProperties for HashMap<String, String, S> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl TableProperties for BTreeMap<String, String> {
    fn property(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Apply table properties on top of `base`
///
/// 1. `orc_bloom_filter_columns` replaces the bloom filter column set
/// 2. `orc_bloom_filter_fpp` replaces the false positive probability
///
/// Absent keys inherit from `base`; unknown keys are ignored. Both values
/// are validated before anything is applied.
pub fn resolve_writer_options<P>(properties: &P, base: &WriterOptions) -> Result<WriterOptions>
where
    P: TableProperties + ?Sized,
{
    let columns = properties
        .property(ORC_BLOOM_FILTER_COLUMNS_KEY)
        .map(parse_bloom_filter_columns);
    let fpp = properties
        .property(ORC_BLOOM_FILTER_FPP_KEY)
        .map(parse_bloom_filter_fpp)
        .transpose()?;

    let mut options = base.clone();
    if let Some(columns) = columns {
        tracing::debug!(columns = columns.len(), "applying table bloom filter columns");
        options = options.with_bloom_filter_columns(columns);
    }
    if let Some(fpp) = fpp {
        tracing::debug!(fpp, "applying table bloom filter fpp");
        options = options.with_bloom_filter_fpp(fpp)?;
    }
    Ok(options)
}

/// Split a comma separated column list
///
/// Tokens are trimmed and empty ones dropped, so `""` and `" , "` both
/// yield an empty set. Names are kept verbatim otherwise.
pub fn parse_bloom_filter_columns(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|column| !column.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse and range-check a bloom filter false positive probability
pub fn parse_bloom_filter_fpp(value: &str) -> Result<f64> {
    let fpp: f64 = value
        .trim()
        .parse()
        .map_err(|_| OptionsError::invalid_config_value(ORC_BLOOM_FILTER_FPP_KEY, value))?;
    check_bloom_filter_fpp(fpp)
}
