//! Strategy configuration.

use crate::tables::measurements::ENTRY_LIFETIME;
use std::time::Duration;

/// How the selector spreads probability over the candidate faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerMode {
    /// Sample directly in proportion to the face weights.
    #[default]
    Categorical,

    /// Sample over the numeric face-id axis: each face owns the id
    /// interval up to the next candidate, so its probability also scales
    /// with the gap between ids.
    IdSpaced,
}

/// Strategy configuration options.
#[derive(Debug, Clone)]
pub struct StrategyOptions {
    /// Sampler used for the weighted random pick.
    pub sampler: SamplerMode,

    /// Seed for the strategy's random source. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// How far a measurement entry's lifetime is pushed out on every
    /// delay or demotion update.
    pub lifetime_extension: Duration,

    /// Interval below which a retransmission is suppressed.
    pub suppression_initial: Duration,

    /// Growth factor applied to the suppression interval on each
    /// forwarded retransmission.
    pub suppression_multiplier: f64,

    /// Upper bound on the suppression interval.
    pub suppression_max: Duration,
}

impl Default for StrategyOptions {
    fn default() -> Self {
        Self {
            sampler: SamplerMode::default(),
            seed: None,
            lifetime_extension: ENTRY_LIFETIME,
            suppression_initial: Duration::from_millis(10),
            suppression_multiplier: 2.0,
            suppression_max: Duration::from_millis(250),
        }
    }
}
