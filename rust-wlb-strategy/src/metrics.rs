//! Strategy metrics.

use rust_wlb_common::metrics::{Counter, DelayHistogram};

/// Aggregate counters for one strategy instance.
#[derive(Debug, Clone, Default)]
pub struct StrategyMetrics {
    pub interests_received: Counter,
    pub interests_forwarded: Counter,
    pub interests_rejected: Counter,
    pub interests_expired: Counter,
    pub retransmissions: Counter,
    pub data_received: Counter,
    pub demotions: Counter,

    /// Observed round-trip delays.
    pub delay_ms: DelayHistogram,
}

impl StrategyMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}
