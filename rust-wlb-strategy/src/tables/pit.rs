//! Pending Interest Table entries.

use crate::tables::face::Face;
use crate::tables::strategy_info::StrategyInfoSlot;
use rust_wlb_common::name::Name;
use rust_wlb_common::packet::Interest;
use rust_wlb_common::types::{FaceId, FaceScope};
use std::time::Instant;

/// Record of one upstream face the Interest was forwarded to.
#[derive(Debug, Clone, Copy)]
pub struct OutRecord {
    face: FaceId,
    last_sent: Instant,
}

impl OutRecord {
    pub fn face(&self) -> FaceId {
        self.face
    }

    pub fn last_sent(&self) -> Instant {
        self.last_sent
    }
}

/// A pending Interest, aggregated by name.
///
/// Tracks which upstream faces the Interest went out on and carries a slot
/// for strategy-private state.
#[derive(Debug)]
pub struct PitEntry {
    name: Name,
    localhost_scoped: bool,
    out_records: Vec<OutRecord>,
    strategy_info: StrategyInfoSlot,
}

impl PitEntry {
    pub fn new(interest: &Interest) -> Self {
        let localhost_scoped = interest
            .name
            .get(0)
            .map(|c| c.as_bytes().as_ref() == b"localhost")
            .unwrap_or(false);

        Self {
            name: interest.name.clone(),
            localhost_scoped,
            out_records: Vec::new(),
            strategy_info: StrategyInfoSlot::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn out_records(&self) -> &[OutRecord] {
        &self.out_records
    }

    /// Records that the Interest went out on `face`, updating the existing
    /// record if the face was already tried.
    pub fn insert_out_record(&mut self, face: FaceId, now: Instant) {
        match self.out_records.iter_mut().find(|r| r.face == face) {
            Some(record) => record.last_sent = now,
            None => self.out_records.push(OutRecord {
                face,
                last_sent: now,
            }),
        }
    }

    /// The most recent time the Interest was sent upstream.
    pub fn last_outgoing(&self) -> Option<Instant> {
        self.out_records.iter().map(|r| r.last_sent).max()
    }

    /// Scope rule: an Interest under `/localhost` must not leave the host.
    pub fn violates_scope(&self, face: &Face) -> bool {
        self.localhost_scoped && face.scope() != FaceScope::Local
    }

    pub fn strategy_info(&self) -> &StrategyInfoSlot {
        &self.strategy_info
    }

    pub fn strategy_info_mut(&mut self) -> &mut StrategyInfoSlot {
        &mut self.strategy_info
    }
}
