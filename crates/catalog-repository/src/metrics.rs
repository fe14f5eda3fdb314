//! Prometheus metrics for the product cache.

use metrics::{counter, describe_counter};

/// Metric names for the product cache.
pub mod names {
    /// Reads answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "catalog_cache_hits_total";
    /// Reads that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "catalog_cache_misses_total";
    /// Entries written after a successful store operation.
    pub const CACHE_WRITES_TOTAL: &str = "catalog_cache_writes_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of product cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of product cache misses");
    describe_counter!(names::CACHE_WRITES_TOTAL, "Total number of product cache writes");
}

/// Product cache metrics recorder.
#[derive(Clone)]
pub struct CacheMetrics;

impl CacheMetrics {
    pub fn hit() {
        counter!(names::CACHE_HITS_TOTAL).increment(1);
    }

    pub fn miss() {
        counter!(names::CACHE_MISSES_TOTAL).increment(1);
    }

    /// Record a cache write; `operation` is create, get or update.
    pub fn write(operation: &'static str) {
        counter!(names::CACHE_WRITES_TOTAL, "operation" => operation).increment(1);
    }
}
