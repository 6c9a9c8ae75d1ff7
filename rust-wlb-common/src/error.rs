//! Error types for the weighted-load-balancer workspace.

use crate::types::FaceId;
use thiserror::Error;

/// All possible errors that can occur within the strategy workspace.
#[derive(Error, Debug)]
pub enum Error {
    /// Error related to NDN name handling.
    #[error("name error: {0}")]
    Name(String),

    /// A face id was registered twice with the host face table.
    #[error("duplicate face id: {0}")]
    DuplicateFace(FaceId),
}
