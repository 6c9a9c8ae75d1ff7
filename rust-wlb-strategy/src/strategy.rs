//! The weighted-load-balancer forwarding strategy.
//!
//! Three host callbacks drive the strategy. On an Interest it stamps the
//! PIT entry, reconciles the prefix's weighted face table against the
//! current next-hops and forwards on a face sampled by weight. On Data it
//! pairs the arrival with the stamp and applies the resulting delay sample
//! to every ancestor prefix carrying measurement state. On retransmission
//! or expiry it poisons the faces the Interest was already sent to.

use crate::config::StrategyOptions;
use crate::measurement::{PitStamp, PrefixMeasurement};
use crate::metrics::StrategyMetrics;
use crate::retx::{ExponentialSuppression, RetxDecision, RetxSuppression};
use crate::selector;
use crate::tables::face::Faces;
use crate::tables::fib::FibEntry;
use crate::tables::measurements::Measurements;
use crate::tables::pit::PitEntry;
use crate::weighted_face::clamp_delay;
use log::{debug, trace, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rust_wlb_common::name::Name;
use rust_wlb_common::packet::{Data, Interest};
use rust_wlb_common::types::FaceId;
use std::fmt;
use std::time::{Duration, Instant};

/// Name under which the host binds this strategy to a prefix.
pub const STRATEGY_NAME: &str = "/localhost/fw/strategy/weighted-load-balancer";

/// What the strategy decided to do with an Interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardingDecision {
    /// Forward the Interest on the given upstream face.
    Forward(FaceId),
    /// No eligible upstream; the pending Interest is rejected.
    Reject,
}

/// The strategy instance: random source, suppression policy and metrics.
///
/// All durable state lives on the host's PIT and measurement entries; the
/// instance itself can be dropped and recreated at any time.
pub struct WeightedLoadBalancer {
    options: StrategyOptions,
    rng: ChaCha8Rng,
    suppression: Box<dyn RetxSuppression>,
    metrics: StrategyMetrics,
}

impl WeightedLoadBalancer {
    pub fn new(options: StrategyOptions) -> Self {
        let suppression = Box::new(ExponentialSuppression::new(
            options.suppression_initial,
            options.suppression_multiplier,
            options.suppression_max,
        ));
        Self::with_suppression(options, suppression)
    }

    /// Builds the strategy with a caller-supplied suppression policy.
    pub fn with_suppression(
        options: StrategyOptions,
        suppression: Box<dyn RetxSuppression>,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            options,
            rng,
            suppression,
            metrics: StrategyMetrics::new(),
        }
    }

    pub fn metrics(&self) -> &StrategyMetrics {
        &self.metrics
    }

    /// Handles an Interest arriving on `in_face`.
    ///
    /// `fib_entry` is the longest-prefix FIB match and `pit_entry` the PIT
    /// entry the host aggregated the Interest into.
    pub fn on_interest(
        &mut self,
        now: Instant,
        faces: &Faces,
        in_face: FaceId,
        interest: &Interest,
        fib_entry: &FibEntry,
        pit_entry: &mut PitEntry,
        measurements: &mut Measurements,
    ) -> ForwardingDecision {
        trace!("received Interest: {}", interest.name);
        self.metrics.interests_received.increment();

        let decision = self.suppression.decide(now, in_face, interest, pit_entry);
        debug!("retx decision for {}: {:?}", interest.name, decision);

        if decision != RetxDecision::New {
            // Every upstream already tried is penalized for apparent
            // non-response.
            self.metrics.retransmissions.increment();
            self.demote(now, pit_entry, measurements);
        }

        // Stamp once, on first handling
        pit_entry
            .strategy_info_mut()
            .get_or_insert_with(|| PitStamp::new(now));

        let entry = measurements.get_or_create(fib_entry.prefix(), now);
        let info = entry
            .strategy_info_mut()
            .get_or_insert_with(PrefixMeasurement::new);
        info.reconcile(fib_entry.next_hops());

        let selected = selector::select_upstream(
            &mut self.rng,
            self.options.sampler,
            info.faces(),
            faces,
            in_face,
            pit_entry,
        );

        match selected {
            Some(face) => {
                pit_entry.insert_out_record(face, now);
                self.metrics.interests_forwarded.increment();
                ForwardingDecision::Forward(face)
            }
            None => {
                self.metrics.interests_rejected.increment();
                ForwardingDecision::Reject
            }
        }
    }

    /// Handles a Data packet returning for `pit_entry` on `in_face`.
    pub fn on_data(
        &mut self,
        now: Instant,
        pit_entry: &PitEntry,
        in_face: FaceId,
        data: &Data,
        measurements: &mut Measurements,
    ) {
        trace!("received Data: {}", data.name);
        self.metrics.data_received.increment();

        let Some(stamp) = pit_entry.strategy_info().get::<PitStamp>() else {
            // No start time available, cannot compute delay for this retrieval
            trace!("no start time available for Data {}", data.name);
            return;
        };

        let delay_ms = clamp_delay(now.saturating_duration_since(stamp.created()));
        trace!("computed delay of {} ms for {}", delay_ms, data.name);
        self.metrics.delay_ms.observe(delay_ms as u64);

        let touched = apply_along_ancestors(
            measurements,
            pit_entry.name(),
            now,
            self.options.lifetime_extension,
            |info| info.record_delay(in_face, delay_ms),
        );
        if touched == 0 {
            warn!("no measurement state along {}", pit_entry.name());
        }
    }

    /// Handles the expiry of a pending Interest.
    pub fn on_expire(&mut self, now: Instant, pit_entry: &PitEntry, measurements: &mut Measurements) {
        trace!("pending Interest expired: {}", pit_entry.name());
        self.metrics.interests_expired.increment();
        self.demote(now, pit_entry, measurements);
    }

    /// Poisons every upstream this PIT entry was sent to, at every
    /// ancestor prefix carrying measurement state.
    fn demote(&mut self, now: Instant, pit_entry: &PitEntry, measurements: &mut Measurements) {
        self.metrics.demotions.increment();
        let tried: Vec<FaceId> = pit_entry.out_records().iter().map(|r| r.face()).collect();
        apply_along_ancestors(
            measurements,
            pit_entry.name(),
            now,
            self.options.lifetime_extension,
            |info| info.demote(tried.iter().copied()),
        );
    }
}

impl fmt::Debug for WeightedLoadBalancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedLoadBalancer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Walks the measurement table upward from `name`, refreshing and applying
/// `apply` to every ancestor entry that carries prefix state. Returns the
/// number of entries touched.
fn apply_along_ancestors(
    measurements: &mut Measurements,
    name: &Name,
    now: Instant,
    extension: Duration,
    mut apply: impl FnMut(&mut PrefixMeasurement),
) -> usize {
    let mut touched = 0;
    for prefix in name.self_and_ancestors() {
        let Some(entry) = measurements.get_mut(&prefix) else {
            continue;
        };
        if !entry.strategy_info().contains::<PrefixMeasurement>() {
            continue;
        }
        entry.extend_lifetime(now, extension);
        if let Some(info) = entry.strategy_info_mut().get_mut::<PrefixMeasurement>() {
            apply(info);
            touched += 1;
        }
    }
    touched
}
