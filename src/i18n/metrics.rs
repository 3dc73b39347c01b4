//! Binding metrics: how often the binder runs and what it changes.
//!
//! Owned by the site context rather than a process-wide singleton, so every
//! page (and every test) starts from zero.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct BindingMetrics {
    /// Number of completed `apply` passes
    passes: AtomicUsize,

    /// Elements whose text was replaced
    texts_updated: AtomicUsize,

    /// Elements whose target attribute was replaced
    attributes_updated: AtomicUsize,

    /// Lookups that found no entry, leaving original content in place
    misses: AtomicUsize,
}

impl BindingMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&self, texts_updated: usize, attributes_updated: usize, misses: usize) {
        self.passes.fetch_add(1, Ordering::Relaxed);
        self.texts_updated.fetch_add(texts_updated, Ordering::Relaxed);
        self.attributes_updated
            .fetch_add(attributes_updated, Ordering::Relaxed);
        self.misses.fetch_add(misses, Ordering::Relaxed);
    }

    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn report(&self) -> MetricsReport {
        let texts = self.texts_updated.load(Ordering::Relaxed);
        let attributes = self.attributes_updated.load(Ordering::Relaxed);

        MetricsReport {
            passes: self.passes(),
            texts_updated: texts,
            attributes_updated: attributes,
            misses: self.misses(),
        }
    }

    pub fn reset(&self) {
        self.passes.store(0, Ordering::Relaxed);
        self.texts_updated.store(0, Ordering::Relaxed);
        self.attributes_updated.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of binding counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub passes: usize,
    pub texts_updated: usize,
    pub attributes_updated: usize,
    pub misses: usize,
}
