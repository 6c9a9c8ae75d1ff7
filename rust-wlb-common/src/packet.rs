//! NDN packet types.
//!
//! These are the in-memory representations the forwarding callbacks carry.
//! Wire encoding and decoding are the host's concern and live with the
//! packet parsing layer, not here. The library never reads a clock or a
//! random source of its own: the host supplies the nonce, just as it
//! supplies the event timestamps.

use crate::name::Name;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Default Interest lifetime, in milliseconds.
pub const DEFAULT_INTEREST_LIFETIME_MS: u32 = 4000;

/// Represents an NDN Interest packet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    /// The name requested in the Interest.
    pub name: Name,

    /// A nonce value to detect looping.
    pub nonce: u32,

    /// Interest lifetime in milliseconds.
    pub lifetime_ms: u32,
}

impl Interest {
    /// Creates a new Interest with the default lifetime.
    ///
    /// The nonce comes from the caller; the host owns whatever randomness
    /// feeds it.
    pub fn new(name: Name, nonce: u32) -> Self {
        Self {
            name,
            nonce,
            lifetime_ms: DEFAULT_INTEREST_LIFETIME_MS,
        }
    }

    /// Sets the Interest lifetime.
    pub fn with_lifetime(mut self, lifetime_ms: u32) -> Self {
        self.lifetime_ms = lifetime_ms;
        self
    }
}

/// Represents an NDN Data packet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Data {
    /// The name of the Data packet.
    pub name: Name,

    /// The content of the Data packet.
    pub content: Bytes,
}

impl Data {
    /// Creates a new Data packet.
    pub fn new(name: Name, content: impl Into<Bytes>) -> Self {
        Self {
            name,
            content: content.into(),
        }
    }
}
