//! Host-owned faces.

use rust_wlb_common::error::Error;
use rust_wlb_common::types::{FaceId, FaceScope};
use rust_wlb_common::Result;
use std::collections::HashMap;

/// A communication endpoint at the forwarder.
///
/// Faces belong to the forwarder; the strategy refers to them by id and
/// never extends their lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    id: FaceId,
    scope: FaceScope,
}

impl Face {
    pub fn new(id: FaceId, scope: FaceScope) -> Self {
        Self { id, scope }
    }

    pub fn id(&self) -> FaceId {
        self.id
    }

    pub fn scope(&self) -> FaceScope {
        self.scope
    }
}

/// The forwarder's face registry, keyed by face id.
#[derive(Debug, Default)]
pub struct Faces {
    faces: HashMap<FaceId, Face>,
}

impl Faces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a face. Face ids are unique; registering an id twice is
    /// an error.
    pub fn insert(&mut self, face: Face) -> Result<()> {
        if self.faces.contains_key(&face.id()) {
            return Err(Error::DuplicateFace(face.id()));
        }
        self.faces.insert(face.id(), face);
        Ok(())
    }

    pub fn get(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(&id)
    }

    pub fn remove(&mut self, id: FaceId) -> Option<Face> {
        self.faces.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
