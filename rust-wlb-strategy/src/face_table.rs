//! The dual-index weighted face container.

use crate::weighted_face::WeightedFace;
use rust_wlb_common::types::FaceId;
use std::collections::{BTreeMap, BTreeSet};

/// A set of [`WeightedFace`] records with two access paths: keyed by face
/// id and ordered by `(delay, face id)`.
///
/// Both indexes are kept consistent on every mutation; a face id appears at
/// most once.
#[derive(Debug, Clone, Default)]
pub struct WeightedFaceTable {
    by_id: BTreeMap<FaceId, WeightedFace>,
    by_delay: BTreeSet<(u32, FaceId)>,
}

impl WeightedFaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh record (delay 0, weight 1.0) for `face_id`.
    ///
    /// No-op if the face is already present. Returns whether a record was
    /// inserted.
    pub fn insert(&mut self, face_id: FaceId) -> bool {
        self.insert_entry(WeightedFace::new(face_id))
    }

    /// Inserts a prebuilt record, keeping its learned delay.
    pub(crate) fn insert_entry(&mut self, face: WeightedFace) -> bool {
        if self.by_id.contains_key(&face.face_id()) {
            return false;
        }
        debug_assert!(!self.by_delay.contains(&face.delay_key()));
        self.by_delay.insert(face.delay_key());
        self.by_id.insert(face.face_id(), face);
        true
    }

    /// Looks up the record for `face_id`.
    pub fn find(&self, face_id: FaceId) -> Option<&WeightedFace> {
        self.by_id.get(&face_id)
    }

    /// Updates the delay of an existing entry, reorganizing the ordered
    /// index. Returns false if the face is not in the table.
    pub fn update_delay(&mut self, face_id: FaceId, delay_ms: u32) -> bool {
        let Some(face) = self.by_id.get_mut(&face_id) else {
            return false;
        };
        let old_key = face.delay_key();
        face.set_delay(delay_ms);
        let new_key = face.delay_key();
        if old_key != new_key {
            self.by_delay.remove(&old_key);
            self.by_delay.insert(new_key);
        }
        true
    }

    /// Iterates records in ascending `(delay, face id)` order.
    pub fn iter_by_delay(&self) -> impl Iterator<Item = &WeightedFace> + '_ {
        self.by_delay
            .iter()
            .filter_map(move |(_, id)| self.by_id.get(id))
    }

    /// Iterates records by face id (ascending).
    pub fn iter_by_id(&self) -> impl Iterator<Item = &WeightedFace> + '_ {
        self.by_id.values()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
