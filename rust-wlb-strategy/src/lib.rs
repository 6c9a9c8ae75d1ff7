//! Delay-weighted random load balancing for an NDN forwarder.
//!
//! The strategy keeps, per FIB-matched name prefix, a table of candidate
//! upstream faces weighted by the round-trip delay last observed on each
//! face. Interests are forwarded on a face sampled in proportion to its
//! weight; returning Data contributes fresh delay samples along the name
//! hierarchy; retransmissions and expirations poison the faces already
//! tried, steering traffic away from unresponsive upstreams.
//!
//! The host forwarder drives the strategy through three callbacks on
//! [`WeightedLoadBalancer`]: one per received Interest, one per returning
//! Data, and one per expiring PIT entry. Everything the strategy learns is
//! attached to the host's PIT and measurement entries and dies with them;
//! nothing is persisted.

pub mod config;
pub mod face_table;
pub mod measurement;
pub mod metrics;
pub mod retx;
pub mod strategy;
pub mod tables;
pub mod weighted_face;

mod selector;

pub use config::{SamplerMode, StrategyOptions};
pub use face_table::WeightedFaceTable;
pub use measurement::{PitStamp, PrefixMeasurement};
pub use metrics::StrategyMetrics;
pub use retx::{ExponentialSuppression, RetxDecision, RetxSuppression};
pub use strategy::{ForwardingDecision, WeightedLoadBalancer, STRATEGY_NAME};
pub use weighted_face::{WeightedFace, MAX_DELAY_MS};
