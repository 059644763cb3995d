//! Caching layer for scan results.
//!
//! Results are keyed by the reference coordinate quantized to a fixed
//! number of decimal places (3 decimals is roughly a 110 m cell), so two
//! scans from the same cell share one remote query. Entries never expire.

use std::fmt;
use std::sync::Arc;

use moka::future::Cache as MokaCache;

use crate::domain::{Coordinate, RankedFacility};

/// Default quantization precision in decimal places.
pub const DEFAULT_PRECISION: usize = 3;

/// A ranked result set shared between the cache and its readers.
pub type RankedList = Arc<Vec<RankedFacility>>;

/// Cache key: a coordinate rounded to a quantization cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey(String);

impl CellKey {
    /// Quantize a coordinate to `precision` decimal places.
    pub fn quantize(coord: &Coordinate, precision: usize) -> Self {
        CellKey(format!(
            "{:.prec$},{:.prec$}",
            coord.lat(),
            coord.lon(),
            prec = precision
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration for the scan cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Decimal places kept when quantizing coordinates.
    pub precision: usize,

    /// Maximum number of cached cells; `None` keeps every entry.
    pub max_capacity: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            max_capacity: None,
        }
    }
}

/// In-memory cache of ranked scan results.
pub struct ScanCache {
    entries: MokaCache<CellKey, RankedList>,
    precision: usize,
}

impl ScanCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let mut builder = MokaCache::<CellKey, RankedList>::builder();
        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        Self {
            entries: builder.build(),
            precision: config.precision,
        }
    }

    /// Derive the cache key for a reference coordinate.
    pub fn key_for(&self, coord: &Coordinate) -> CellKey {
        CellKey::quantize(coord, self.precision)
    }

    pub async fn get(&self, key: &CellKey) -> Option<RankedList> {
        self.entries.get(key).await
    }

    pub async fn put(&self, key: CellKey, list: RankedList) {
        self.entries.insert(key, list).await;
    }

    /// Number of cached cells, after flushing moka's pending bookkeeping.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    /// Drop every cached entry.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}
