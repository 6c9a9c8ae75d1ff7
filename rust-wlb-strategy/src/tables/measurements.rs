//! The measurements table: strategy scratch state indexed by name prefix.

use crate::tables::strategy_info::StrategyInfoSlot;
use rust_wlb_common::name::Name;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Lifetime granted to a measurement entry on creation and on every
/// refresh.
pub const ENTRY_LIFETIME: Duration = Duration::from_secs(16);

/// One node of the measurements table.
///
/// Expires unless refreshed; carries a slot for strategy-private state.
#[derive(Debug)]
pub struct MeasurementEntry {
    name: Name,
    expires_at: Instant,
    strategy_info: StrategyInfoSlot,
}

impl MeasurementEntry {
    fn new(name: Name, now: Instant, lifetime: Duration) -> Self {
        Self {
            name,
            expires_at: now + lifetime,
            strategy_info: StrategyInfoSlot::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Pushes the expiry out to at least `now + extension`.
    pub fn extend_lifetime(&mut self, now: Instant, extension: Duration) {
        self.expires_at = self.expires_at.max(now + extension);
    }

    pub fn strategy_info(&self) -> &StrategyInfoSlot {
        &self.strategy_info
    }

    pub fn strategy_info_mut(&mut self) -> &mut StrategyInfoSlot {
        &mut self.strategy_info
    }
}

/// Name-keyed measurement entries.
///
/// Entries attach lazily on first use and are dropped by the expiry sweep
/// once nothing has refreshed them.
#[derive(Debug, Default)]
pub struct Measurements {
    entries: HashMap<Name, MeasurementEntry>,
}

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry for `name`, creating it if absent.
    pub fn get_or_create(&mut self, name: &Name, now: Instant) -> &mut MeasurementEntry {
        self.entries
            .entry(name.clone())
            .or_insert_with(|| MeasurementEntry::new(name.clone(), now, ENTRY_LIFETIME))
    }

    pub fn get(&self, name: &Name) -> Option<&MeasurementEntry> {
        self.entries.get(name)
    }

    pub fn get_mut(&mut self, name: &Name) -> Option<&mut MeasurementEntry> {
        self.entries.get_mut(name)
    }

    /// Drops entries whose lifetime has run out. Returns how many were
    /// removed.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
