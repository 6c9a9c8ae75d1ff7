//! Identifier types shared between the strategy core and the host tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a face.
///
/// Real faces carry positive ids below [`INVALID_FACE_ID`]; the sentinel is
/// reserved so it can terminate id-ordered sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FaceId(pub u64);

/// Reserved sentinel face id, greater than any real face id.
pub const INVALID_FACE_ID: FaceId = FaceId(u64::MAX);

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FaceId({})", self.0)
    }
}

/// Locality of a face with respect to the local host.
///
/// Interests scoped to the local host must not leave it, so the strategy
/// needs to know whether an upstream face crosses the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceScope {
    /// The face connects a local application or the forwarder itself.
    Local,
    /// The face reaches beyond the local host.
    NonLocal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_id_display() {
        assert_eq!(FaceId(7).to_string(), "FaceId(7)");
    }

    #[test]
    fn invalid_face_id_is_greater_than_any_real_id() {
        assert!(FaceId(0) < INVALID_FACE_ID);
        assert!(FaceId(u64::MAX - 1) < INVALID_FACE_ID);
    }
}
