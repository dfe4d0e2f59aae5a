//! In-process counters for upstream traffic and degraded searches.
//!
//! One [`Metrics`] handle is shared by the upstream client and the search
//! tool. Nothing is exported over HTTP; `main` logs a snapshot on shutdown.

use crate::models::ResourceType;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Default)]
struct Counters {
    upstream_calls: AtomicU64,
    upstream_failures: AtomicU64,
    upstream_millis: AtomicU64,
    searches: AtomicU64,
    skipped_messages: AtomicU64,
    skipped_contacts: AtomicU64,
    skipped_calls: AtomicU64,
}

/// Cloneable handle; clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing one upstream call. The call is counted when the timer
    /// is finished with its outcome.
    pub fn start_upstream_call(&self) -> UpstreamTimer {
        UpstreamTimer {
            started: Instant::now(),
            metrics: self.clone(),
        }
    }

    pub fn record_search(&self) {
        self.counters.searches.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a search branch whose upstream query failed and was dropped
    /// from the merged result.
    pub fn record_skipped_branch(&self, kind: ResourceType) {
        let counter = match kind {
            ResourceType::Message => &self.counters.skipped_messages,
            ResourceType::Contact => &self.counters.skipped_contacts,
            ResourceType::Call => &self.counters.skipped_calls,
            // not a search branch
            ResourceType::PhoneNumbers => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn upstream_calls(&self) -> u64 {
        self.counters.upstream_calls.load(Ordering::Relaxed)
    }

    pub fn upstream_failures(&self) -> u64 {
        self.counters.upstream_failures.load(Ordering::Relaxed)
    }

    pub fn searches(&self) -> u64 {
        self.counters.searches.load(Ordering::Relaxed)
    }

    pub fn skipped_branches(&self, kind: ResourceType) -> u64 {
        match kind {
            ResourceType::Message => self.counters.skipped_messages.load(Ordering::Relaxed),
            ResourceType::Contact => self.counters.skipped_contacts.load(Ordering::Relaxed),
            ResourceType::Call => self.counters.skipped_calls.load(Ordering::Relaxed),
            ResourceType::PhoneNumbers => 0,
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let calls = self.upstream_calls();
        let millis = self.counters.upstream_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            upstream_calls: calls,
            upstream_failures: self.upstream_failures(),
            upstream_avg_ms: if calls == 0 { 0 } else { millis / calls },
            searches: self.searches(),
            skipped_messages: self.skipped_branches(ResourceType::Message),
            skipped_contacts: self.skipped_branches(ResourceType::Contact),
            skipped_calls: self.skipped_branches(ResourceType::Call),
        }
    }
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub upstream_calls: u64,
    pub upstream_failures: u64,
    pub upstream_avg_ms: u64,
    pub searches: u64,
    pub skipped_messages: u64,
    pub skipped_contacts: u64,
    pub skipped_calls: u64,
}

/// Timer for a single upstream call.
#[must_use = "an unfinished timer records nothing"]
pub struct UpstreamTimer {
    started: Instant,
    metrics: Metrics,
}

impl UpstreamTimer {
    /// Record the call. Pass the result after the body has been read and
    /// parsed, so decode failures count as failures.
    pub fn finish<T, E>(self, outcome: &Result<T, E>) {
        let counters = &self.metrics.counters;
        let elapsed = self.started.elapsed().as_millis() as u64;

        counters.upstream_calls.fetch_add(1, Ordering::Relaxed);
        counters.upstream_millis.fetch_add(elapsed, Ordering::Relaxed);
        if outcome.is_err() {
            counters.upstream_failures.fetch_add(1, Ordering::Relaxed);
        }
    }
}
