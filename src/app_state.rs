// =============================================================================
// Application State — shared by the REST handlers
// =============================================================================
//
// Holds the configured engine and a pair of lock-free counters for the health
// endpoint.  Results are never cached here: every request computes its own
// report from the history it carries.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::engine::IndicatorEngine;
use crate::runtime_config::RuntimeConfig;

/// Shared across all handlers via `Arc<AppState>`.
pub struct AppState {
    pub engine: IndicatorEngine,
    analyses_completed: AtomicU64,
    analyses_rejected: AtomicU64,
}

/// Counter snapshot for the health payload.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    pub analyses_completed: u64,
    pub analyses_rejected: u64,
}

impl AppState {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self {
            engine: config.engine(),
            analyses_completed: AtomicU64::new(0),
            analyses_rejected: AtomicU64::new(0),
        }
    }

    pub fn record_completed(&self) {
        self.analyses_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected(&self) {
        self.analyses_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn usage(&self) -> UsageSnapshot {
        UsageSnapshot {
            analyses_completed: self.analyses_completed.load(Ordering::Relaxed),
            analyses_rejected: self.analyses_rejected.load(Ordering::Relaxed),
        }
    }
}
