use crate::results::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

/// Source of timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// The most recent successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedAnalysis {
    pub url: String,
    pub result: AnalysisResult,
    pub timestamp: DateTime<Utc>,
}

/// Single-slot, last-write-wins store for the latest analysis
///
/// Cloning shares the slot.
#[derive(Clone)]
pub struct AnalysisCache {
    slot: Arc<Mutex<Option<CachedAnalysis>>>,
    clock: Arc<dyn Clock>,
}

impl AnalysisCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
            clock,
        }
    }

    /// Replace whatever is cached
    pub fn store(&self, url: &str, result: &AnalysisResult) {
        let entry = CachedAnalysis {
            url: url.to_string(),
            result: result.clone(),
            timestamp: self.clock.now(),
        };
        ::log::debug!("Caching analysis for {}", url);
        *self.lock() = Some(entry);
    }

    /// The cached analysis, if it belongs to `url`
    pub fn lookup(&self, url: &str) -> Option<CachedAnalysis> {
        self.lock().as_ref().filter(|entry| entry.url == url).cloned()
    }

    pub fn latest(&self) -> Option<CachedAnalysis> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CachedAnalysis>> {
        // A poisoned slot still holds a complete value
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for AnalysisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisCache")
            .field("latest", &self.latest())
            .finish()
    }
}
