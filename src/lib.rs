//! # ORC Writer Options
//!
//! Construction and validation of the options that parameterize an ORC
//! file writer:
//! - Stripe and row group sizing
//! - Dictionary, statistics and compression memory limits
//! - Per-column bloom filters and their false positive probability
//!
//! ## Configuration Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Engine Defaults                           │
//! │              (WriterOptions::default)                        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Process-Wide Settings                        │
//! │          (WriterConfig::to_writer_options)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Per-Table Properties                         │
//! │               (resolve_writer_options)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               WriterOptions snapshot
//!               consumed by the writer
//! ```
//!
//! Every layer produces a new immutable [`WriterOptions`]; snapshots can be
//! shared across writer threads without locking.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod data_size;
pub mod options;
pub mod config;
pub mod properties;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{OptionsError, Result};
pub use data_size::{DataSize, DataSizeUnit};
pub use options::{WriterIdentification, WriterOptions};
pub use config::WriterConfig;
pub use properties::{
    resolve_writer_options, TableProperties, ORC_BLOOM_FILTER_COLUMNS_KEY, ORC_BLOOM_FILTER_FPP_KEY,
};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
