//! Retransmission suppression.

use crate::tables::pit::PitEntry;
use crate::tables::strategy_info::StrategyInfo;
use rust_wlb_common::packet::Interest;
use rust_wlb_common::types::FaceId;
use std::time::{Duration, Instant};

/// Verdict on an incoming Interest relative to its PIT entry's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetxDecision {
    /// First time this Interest is handled.
    New,
    /// A retransmission that warrants trying upstream again.
    Forward,
    /// A retransmission arriving too soon after the last send.
    Suppress,
}

/// Decides how to treat a possibly retransmitted Interest.
pub trait RetxSuppression {
    fn decide(
        &mut self,
        now: Instant,
        in_face: FaceId,
        interest: &Interest,
        pit_entry: &mut PitEntry,
    ) -> RetxDecision;
}

/// Per-PIT-entry suppression state.
#[derive(Debug, Clone, Copy)]
struct SuppressionState {
    interval: Duration,
}

impl StrategyInfo for SuppressionState {
    const TYPE_ID: u16 = 9972;
}

/// Suppression with an exponentially growing per-entry interval.
///
/// A retransmission within the interval since the last upstream send is
/// suppressed; one outside it is forwarded and grows the interval up to
/// the cap.
#[derive(Debug, Clone)]
pub struct ExponentialSuppression {
    initial: Duration,
    multiplier: f64,
    max: Duration,
}

impl ExponentialSuppression {
    pub fn new(initial: Duration, multiplier: f64, max: Duration) -> Self {
        Self {
            initial,
            multiplier,
            max,
        }
    }
}

impl RetxSuppression for ExponentialSuppression {
    fn decide(
        &mut self,
        now: Instant,
        _in_face: FaceId,
        _interest: &Interest,
        pit_entry: &mut PitEntry,
    ) -> RetxDecision {
        let Some(last_sent) = pit_entry.last_outgoing() else {
            return RetxDecision::New;
        };

        let initial = self.initial;
        let state = pit_entry
            .strategy_info_mut()
            .get_or_insert_with(|| SuppressionState { interval: initial });

        if now.saturating_duration_since(last_sent) < state.interval {
            RetxDecision::Suppress
        } else {
            state.interval = state.interval.mul_f64(self.multiplier).min(self.max);
            RetxDecision::Forward
        }
    }
}
