//! Language negotiation metrics.
//!
//! Counts how each request's language was decided, so operators can see how
//! often clients send a usable signal versus landing on the default.

use crate::i18n::LanguageSource;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters of resolved languages by source.
#[derive(Debug, Default)]
pub struct NegotiationMetrics {
    /// Requests resolved from the explicit `lang` override
    by_override: AtomicUsize,

    /// Requests resolved from the `Accept-Language` header
    by_header: AtomicUsize,

    /// Requests that fell back to the default language
    by_default: AtomicUsize,
}

impl NegotiationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one resolution.
    pub fn record(&self, source: LanguageSource) {
        let counter = match source {
            LanguageSource::Override => &self.by_override,
            LanguageSource::Header => &self.by_header,
            LanguageSource::Default => &self.by_default,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn by_override(&self) -> usize {
        self.by_override.load(Ordering::Relaxed)
    }

    pub fn by_header(&self) -> usize {
        self.by_header.load(Ordering::Relaxed)
    }

    pub fn by_default(&self) -> usize {
        self.by_default.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let by_override = self.by_override();
        let by_header = self.by_header();
        let by_default = self.by_default();
        let total = by_override + by_header + by_default;

        let negotiated_rate = if total > 0 {
            ((by_override + by_header) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            total_requests: total,
            resolved_by_override: by_override,
            resolved_by_header: by_header,
            resolved_by_default: by_default,
            negotiated_rate,
        }
    }
}

/// Snapshot of negotiation statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Total number of resolutions recorded
    pub total_requests: usize,

    /// Resolutions decided by the `lang` override
    pub resolved_by_override: usize,

    /// Resolutions decided by `Accept-Language`
    pub resolved_by_header: usize,

    /// Resolutions that used the default language
    pub resolved_by_default: usize,

    /// Share of requests that carried a usable language signal (0-100)
    pub negotiated_rate: f64,
}
