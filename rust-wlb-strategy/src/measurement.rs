//! Strategy state attached to host table entries.
//!
//! Two kinds of state exist: a creation stamp on each PIT entry, and the
//! delay-weighted face table on each measurement entry the strategy uses.

use crate::face_table::WeightedFaceTable;
use crate::tables::fib::NextHop;
use crate::tables::strategy_info::StrategyInfo;
use crate::weighted_face::MAX_DELAY_MS;
use log::debug;
use rust_wlb_common::types::FaceId;
use std::time::Instant;

/// The instant a pending Interest was first handled.
///
/// Immutable once attached; pairing it with the returning Data yields the
/// round-trip delay sample.
#[derive(Debug, Clone, Copy)]
pub struct PitStamp {
    created: Instant,
}

impl PitStamp {
    pub fn new(now: Instant) -> Self {
        Self { created: now }
    }

    pub fn created(&self) -> Instant {
        self.created
    }
}

impl StrategyInfo for PitStamp {
    const TYPE_ID: u16 = 9970;
}

/// Per-prefix strategy state: the weighted face table for one FIB-matched
/// name prefix.
#[derive(Debug, Clone, Default)]
pub struct PrefixMeasurement {
    faces: WeightedFaceTable,
}

impl PrefixMeasurement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn faces(&self) -> &WeightedFaceTable {
        &self.faces
    }

    /// Reconciles the table against the prefix's current next-hop list.
    ///
    /// Faces already known keep their learned delay; faces that joined the
    /// list start fresh at delay 0; faces that left are dropped. The table
    /// is replaced in one step.
    pub fn reconcile(&mut self, next_hops: &[NextHop]) {
        let mut updated = WeightedFaceTable::new();
        for hop in next_hops {
            match self.faces.find(hop.face()) {
                Some(known) => updated.insert_entry(known.clone()),
                None => updated.insert(hop.face()),
            };
        }
        self.faces = updated;
    }

    /// Records a delay observation for `face_id`.
    ///
    /// Data may return on a face no longer among the next-hops; the sample
    /// is ignored then.
    pub fn record_delay(&mut self, face_id: FaceId, delay_ms: u32) {
        let old_weight = self.faces.find(face_id).map(|f| f.weight());
        if self.faces.update_delay(face_id, delay_ms) {
            if let (Some(old), Some(face)) = (old_weight, self.faces.find(face_id)) {
                debug!("updated weight of {}: {} -> {}", face_id, old, face.weight());
            }
        }
    }

    /// Forces the delay of every listed face to the poison value.
    pub fn demote<I: IntoIterator<Item = FaceId>>(&mut self, face_ids: I) {
        for face_id in face_ids {
            self.record_delay(face_id, MAX_DELAY_MS);
        }
    }
}

impl StrategyInfo for PrefixMeasurement {
    const TYPE_ID: u16 = 9971;
}
