//! Integration tests for the three configuration layers
//!
//! engine defaults -> process config -> table properties -> writer

use std::collections::HashMap;
use std::sync::{Arc, Once};
use std::thread;

use orc_writer_options::{
    resolve_writer_options, DataSize, DataSizeUnit, OptionsError, WriterConfig,
    WriterIdentification, WriterOptions, ORC_BLOOM_FILTER_COLUMNS_KEY, ORC_BLOOM_FILTER_FPP_KEY,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("orc_writer_options=debug"))
            .with_test_writer()
            .try_init();
    });
}

fn table_properties(columns: &str, fpp: &str) -> HashMap<String, String> {
    HashMap::from([
        (ORC_BLOOM_FILTER_COLUMNS_KEY.to_string(), columns.to_string()),
        (ORC_BLOOM_FILTER_FPP_KEY.to_string(), fpp.to_string()),
    ])
}

// =============================================================================
// Layering Tests
// =============================================================================

#[test]
fn test_all_layers_compose() {
    init_tracing();

    let process: WriterConfig = serde_json::from_str(
        r#"{"stripe_max_size": "128MB", "default_bloom_filter_fpp": 0.1}"#,
    )
    .unwrap();
    let base = process.to_writer_options();

    let options = resolve_writer_options(&table_properties("user_id, order_id", "0.01"), &base)
        .unwrap();

    // Engine default survives both layers
    assert_eq!(options.stripe_min_size(), DataSize::of(32, DataSizeUnit::Megabyte));
    // Process layer survives the table layer
    assert_eq!(options.stripe_max_size(), DataSize::of(128, DataSizeUnit::Megabyte));
    // Table layer wins where it speaks
    assert_eq!(options.bloom_filter_fpp(), 0.01);
    assert!(options.is_bloom_filter_column("user_id"));
    assert!(options.is_bloom_filter_column("order_id"));
}

#[test]
fn test_table_without_fpp_uses_process_default() {
    init_tracing();

    let base = WriterConfig::new().default_bloom_filter_fpp(0.2).to_writer_options();
    let props = HashMap::from([(ORC_BLOOM_FILTER_COLUMNS_KEY.to_string(), "a".to_string())]);

    let options = resolve_writer_options(&props, &base).unwrap();

    assert_eq!(options.bloom_filter_fpp(), 0.2);
    assert!(options.is_bloom_filter_column("a"));
}

#[test]
fn test_rejected_table_fails_whole_resolution() {
    init_tracing();

    let base = WriterConfig::new()
        .writer_identification(WriterIdentification::LegacyHiveCompatible)
        .to_writer_options();

    let result = resolve_writer_options(&table_properties("a, b", "1.5"), &base);

    assert_eq!(result, Err(OptionsError::OutOfRangeValue));
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_snapshot_shared_across_threads() {
    init_tracing();

    let base = Arc::new(WriterOptions::default());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let base = Arc::clone(&base);
            thread::spawn(move || {
                let fpp = format!("0.{}", i + 1);
                let props = table_properties(&format!("col_{i}"), &fpp);
                resolve_writer_options(&props, &base).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let options = handle.join().unwrap();
        assert!(options.is_bloom_filter_column(&format!("col_{i}")));
        assert_eq!(options.bloom_filter_fpp(), format!("0.{}", i + 1).parse::<f64>().unwrap());
    }

    assert_eq!(*base, WriterOptions::default());
}
