//! The facility discovery pipeline.
//!
//! One scan runs: cooldown gate → cache lookup → remote query with
//! endpoint fallback → normalize, score, sort, truncate → cache store →
//! publish. All mutable session state lives in [`Discovery`]; there are no
//! globals.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use crate::cache::{CellKey, RankedList, ScanCache};
use crate::domain::{Category, Coordinate};
use crate::overpass::FacilityQuery;

use super::config::ScanConfig;
use super::error::ScanError;
use super::rank::rank_facilities;
use super::source::FacilitySource;

/// Where a scan's results came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSource {
    /// Served from the result cache without a remote query.
    Cache,
    /// Fetched from the named endpoint.
    Remote { endpoint: String },
}

/// A successful scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Ranked facilities, best first.
    pub facilities: RankedList,
    pub source: ScanSource,
    /// Reference coordinate the scan was centred on.
    pub reference: Coordinate,
    /// Quantization cell the result is cached under.
    pub key: CellKey,
    /// Scan attempt number within the session.
    pub generation: u64,
    pub scanned_at: DateTime<Utc>,
}

impl ScanOutcome {
    /// Short status line for the HUD.
    pub fn hud_message(&self) -> String {
        match self.source {
            ScanSource::Cache => "LOADING FROM CACHE".to_string(),
            ScanSource::Remote { .. } => {
                format!("SCAN COMPLETE – SHOWING {}", self.facilities.len())
            }
        }
    }

    pub fn from_cache(&self) -> bool {
        self.source == ScanSource::Cache
    }
}

/// Per-session scan state.
#[derive(Debug, Default)]
struct ScanState {
    reference: Option<Coordinate>,
    last_scan: Option<DateTime<Utc>>,
    generation: u64,
    latest: Option<ScanOutcome>,
}

/// A discovery session: cooldown, cache, reference coordinate and the
/// latest published result.
///
/// The state lock is never held across an `.await`, so scans from
/// concurrent callers may overlap; the generation counter decides which
/// result is published.
pub struct Discovery<S: FacilitySource> {
    source: S,
    cache: ScanCache,
    config: ScanConfig,
    state: Mutex<ScanState>,
}

impl<S: FacilitySource> Discovery<S> {
    /// Start a new session.
    pub fn new(source: S, config: ScanConfig) -> Self {
        Self {
            source,
            cache: ScanCache::new(&config.cache),
            config,
            state: Mutex::new(ScanState::default()),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn cache(&self) -> &ScanCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn lock_state(&self) -> MutexGuard<'_, ScanState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the reference coordinate (new GPS fix or searched place).
    pub fn set_reference(&self, reference: Coordinate) {
        tracing::info!(%reference, "reference coordinate set");
        self.lock_state().reference = Some(reference);
    }

    pub fn reference(&self) -> Option<Coordinate> {
        self.lock_state().reference
    }

    /// The most recently published scan, if any.
    pub fn latest(&self) -> Option<ScanOutcome> {
        self.lock_state().latest.clone()
    }

    /// Scan around the current reference coordinate.
    pub async fn scan_current(&self, now: DateTime<Utc>) -> Result<ScanOutcome, ScanError> {
        let reference = self.reference().ok_or(ScanError::NoReferenceCoordinate)?;
        self.scan(reference, now).await
    }

    /// Scan for facilities around `reference`.
    ///
    /// The cooldown covers every attempt that gets past the gate, including
    /// ones answered from the cache.
    pub async fn scan(
        &self,
        reference: Coordinate,
        now: DateTime<Utc>,
    ) -> Result<ScanOutcome, ScanError> {
        let generation = self.begin_attempt(now)?;
        let key = self.cache.key_for(&reference);

        if let Some(cached) = self.cache.get(&key).await {
            tracing::debug!(%key, generation, "scan served from cache");
            let outcome = ScanOutcome {
                facilities: cached,
                source: ScanSource::Cache,
                reference,
                key,
                generation,
                scanned_at: now,
            };
            self.publish(&outcome)?;
            return Ok(outcome);
        }

        let query = FacilityQuery {
            center: reference,
            radius_m: self.config.radius_m,
            categories: Category::SCANNED.to_vec(),
        };

        let batch = self.source.find_facilities(&query).await.map_err(|e| {
            tracing::warn!(error = %e, generation, "scan failed");
            ScanError::from(e)
        })?;

        if batch.facilities.is_empty() {
            tracing::info!(%key, generation, "scan found no facilities");
            return Err(ScanError::NoFacilitiesFound);
        }

        let ranked = rank_facilities(
            &reference,
            batch.facilities,
            &self.config.policy,
            self.config.max_results,
        );
        let facilities: RankedList = Arc::new(ranked);

        // The result is correct for its own cell even if a newer scan started.
        self.cache.put(key.clone(), facilities.clone()).await;

        let outcome = ScanOutcome {
            facilities,
            source: ScanSource::Remote {
                endpoint: batch.endpoint,
            },
            reference,
            key,
            generation,
            scanned_at: now,
        };
        self.publish(&outcome)?;

        tracing::info!(
            key = %outcome.key,
            generation,
            count = outcome.facilities.len(),
            "scan complete"
        );
        Ok(outcome)
    }

    /// Apply the cooldown gate and open a new generation.
    fn begin_attempt(&self, now: DateTime<Utc>) -> Result<u64, ScanError> {
        let mut state = self.lock_state();

        if let Some(last) = state.last_scan {
            let elapsed = now - last;
            let cooldown = self.config.cooldown();
            if elapsed < cooldown {
                return Err(ScanError::CooldownActive {
                    remaining: cooldown - elapsed,
                });
            }
        }

        state.last_scan = Some(now);
        state.generation += 1;
        Ok(state.generation)
    }

    /// Make `outcome` the latest result unless a newer scan has started.
    fn publish(&self, outcome: &ScanOutcome) -> Result<(), ScanError> {
        let mut state = self.lock_state();

        if state.generation != outcome.generation {
            tracing::debug!(
                generation = outcome.generation,
                latest = state.generation,
                "discarding superseded scan"
            );
            return Err(ScanError::Superseded {
                generation: outcome.generation,
                latest: state.generation,
            });
        }

        state.latest = Some(outcome.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
