//! Metrics for vault mediation and session lifecycle
//!
//! Plain atomic counters, read through [`Metrics::snapshot`].

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::DenyReason;
use crate::domain::Intent;

/// Metrics collector for the mediator
///
/// Shared between the dispatch thread and whoever reports on it.
#[derive(Default, Debug)]
pub struct Metrics {
    /// Delayed loads scheduled on connect
    pub loads_scheduled: AtomicU64,
    /// Delayed loads cancelled before firing
    pub loads_cancelled: AtomicU64,
    /// Loads parked behind an in-flight save
    pub loads_queued: AtomicU64,
    /// Loads handed to a worker
    pub loads_started: AtomicU64,
    /// Loads registered successfully
    pub loads_completed: AtomicU64,
    /// Loads that failed in the persister
    pub loads_failed: AtomicU64,
    /// Loads that completed for a session that no longer wanted them
    pub loads_discarded: AtomicU64,
    /// Saves handed to a worker
    pub saves_started: AtomicU64,
    /// Saves that completed successfully
    pub saves_completed: AtomicU64,
    /// Saves that failed in the persister
    pub saves_failed: AtomicU64,
    /// Interactions denied for a blacklisted item
    pub denied_blacklisted: AtomicU64,
    /// Interactions denied for a missing take capability
    pub denied_take: AtomicU64,
    /// Interactions denied for a missing add capability
    pub denied_add: AtomicU64,
    /// Selector requests from players whose vaults are not loaded
    pub denied_not_loaded: AtomicU64,
    /// Container transfers blocked by the blacklist
    pub transfers_blocked: AtomicU64,
    /// Consistency violations observed
    pub consistency_violations: AtomicU64,
    /// Selector menus launched
    pub selector_launches: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_load_scheduled(&self) {
        Self::bump(&self.loads_scheduled);
    }

    pub fn record_load_cancelled(&self) {
        Self::bump(&self.loads_cancelled);
    }

    pub fn record_load_queued(&self) {
        Self::bump(&self.loads_queued);
    }

    pub fn record_load_started(&self) {
        Self::bump(&self.loads_started);
    }

    pub fn record_load_completed(&self) {
        Self::bump(&self.loads_completed);
    }

    pub fn record_load_failed(&self) {
        Self::bump(&self.loads_failed);
    }

    pub fn record_load_discarded(&self) {
        Self::bump(&self.loads_discarded);
    }

    pub fn record_save_started(&self) {
        Self::bump(&self.saves_started);
    }

    /// Record the end of a save
    pub fn record_save_finished(&self, ok: bool) {
        if ok {
            Self::bump(&self.saves_completed);
        } else {
            Self::bump(&self.saves_failed);
        }
    }

    /// Record a policy denial by reason
    pub fn record_denial(&self, reason: DenyReason) {
        match reason {
            DenyReason::BlacklistedItem => Self::bump(&self.denied_blacklisted),
            DenyReason::NoPermission(Intent::Add) => Self::bump(&self.denied_add),
            DenyReason::NoPermission(_) => Self::bump(&self.denied_take),
        }
    }

    pub fn record_not_loaded(&self) {
        Self::bump(&self.denied_not_loaded);
    }

    pub fn record_transfer_blocked(&self) {
        Self::bump(&self.transfers_blocked);
    }

    pub fn record_violation(&self) {
        Self::bump(&self.consistency_violations);
    }

    pub fn record_selector_launch(&self) {
        Self::bump(&self.selector_launches);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        let load = |c: &AtomicU64| c.load(Ordering::Relaxed);
        MetricsSnapshot {
            loads_scheduled: load(&self.loads_scheduled),
            loads_cancelled: load(&self.loads_cancelled),
            loads_queued: load(&self.loads_queued),
            loads_started: load(&self.loads_started),
            loads_completed: load(&self.loads_completed),
            loads_failed: load(&self.loads_failed),
            loads_discarded: load(&self.loads_discarded),
            saves_started: load(&self.saves_started),
            saves_completed: load(&self.saves_completed),
            saves_failed: load(&self.saves_failed),
            denied_blacklisted: load(&self.denied_blacklisted),
            denied_take: load(&self.denied_take),
            denied_add: load(&self.denied_add),
            denied_not_loaded: load(&self.denied_not_loaded),
            transfers_blocked: load(&self.transfers_blocked),
            consistency_violations: load(&self.consistency_violations),
            selector_launches: load(&self.selector_launches),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub loads_scheduled: u64,
    pub loads_cancelled: u64,
    pub loads_queued: u64,
    pub loads_started: u64,
    pub loads_completed: u64,
    pub loads_failed: u64,
    pub loads_discarded: u64,
    pub saves_started: u64,
    pub saves_completed: u64,
    pub saves_failed: u64,
    pub denied_blacklisted: u64,
    pub denied_take: u64,
    pub denied_add: u64,
    pub denied_not_loaded: u64,
    pub transfers_blocked: u64,
    pub consistency_violations: u64,
    pub selector_launches: u64,
}

impl MetricsSnapshot {
    /// Total interactions denied with a message
    pub fn total_denials(&self) -> u64 {
        self.denied_blacklisted + self.denied_take + self.denied_add + self.denied_not_loaded
    }
}
