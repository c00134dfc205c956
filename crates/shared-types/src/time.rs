//! # Time Provider
//!
//! Converts between wall-clock time, slots and epochs. Slots before the
//! genesis slot all belong to epoch 0. An epoch spans
//! `2^slots_per_epoch_exponent` slots.

use serde::{Deserialize, Serialize};

use crate::identifiers::{EpochIndex, SlotIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeProvider {
    genesis_slot: SlotIndex,
    genesis_unix_timestamp: i64,
    slot_duration_seconds: u16,
    slots_per_epoch_exponent: u8,
}

impl TimeProvider {
    pub fn new(
        genesis_slot: SlotIndex,
        genesis_unix_timestamp: i64,
        slot_duration_seconds: u16,
        slots_per_epoch_exponent: u8,
    ) -> Self {
        Self {
            genesis_slot,
            genesis_unix_timestamp,
            slot_duration_seconds,
            slots_per_epoch_exponent,
        }
    }

    pub fn genesis_slot(&self) -> SlotIndex {
        self.genesis_slot
    }

    pub fn genesis_unix_timestamp(&self) -> i64 {
        self.genesis_unix_timestamp
    }

    pub fn slot_duration_seconds(&self) -> u16 {
        self.slot_duration_seconds
    }

    pub fn slots_per_epoch_exponent(&self) -> u8 {
        self.slots_per_epoch_exponent
    }

    pub fn epoch_duration_slots(&self) -> u64 {
        1u64 << self.slots_per_epoch_exponent
    }

    pub fn epoch_duration_seconds(&self) -> u64 {
        self.epoch_duration_slots() * u64::from(self.slot_duration_seconds)
    }

    /// Slot containing `unix_seconds`. The genesis slot covers everything up
    /// to and including the genesis timestamp.
    pub fn slot_from_time(&self, unix_seconds: i64) -> SlotIndex {
        let elapsed = unix_seconds.saturating_sub(self.genesis_unix_timestamp);
        if elapsed < 0 || self.slot_duration_seconds == 0 {
            return self.genesis_slot;
        }
        let slots = elapsed as u64 / u64::from(self.slot_duration_seconds) + 1;
        u64::from(self.genesis_slot)
            .saturating_add(slots)
            .min(u64::from(SlotIndex::MAX)) as SlotIndex
    }

    /// Unix time at which `slot` starts.
    pub fn slot_start_time(&self, slot: SlotIndex) -> i64 {
        if slot <= self.genesis_slot {
            return self.genesis_unix_timestamp;
        }
        let elapsed = i64::from(slot - self.genesis_slot - 1) * i64::from(self.slot_duration_seconds);
        self.genesis_unix_timestamp.saturating_add(elapsed)
    }

    pub fn epoch_from_slot(&self, slot: SlotIndex) -> EpochIndex {
        if slot < self.genesis_slot {
            return 0;
        }
        (slot - self.genesis_slot) >> self.slots_per_epoch_exponent
    }

    /// First slot of `epoch`.
    pub fn epoch_start(&self, epoch: EpochIndex) -> SlotIndex {
        self.genesis_slot
            .wrapping_add(epoch.wrapping_shl(u32::from(self.slots_per_epoch_exponent)))
    }

    /// Last slot of `epoch`.
    pub fn epoch_end(&self, epoch: EpochIndex) -> SlotIndex {
        self.epoch_start(epoch.wrapping_add(1)).wrapping_sub(1)
    }

    /// Slots from `slot` up to the first slot of the next epoch.
    pub fn slots_before_next_epoch(&self, slot: SlotIndex) -> SlotIndex {
        if slot < self.genesis_slot {
            return 0;
        }
        self.epoch_start(self.epoch_from_slot(slot) + 1)
            .wrapping_sub(slot)
    }

    /// Slots elapsed since the first slot of the epoch containing `slot`.
    pub fn slots_since_epoch_start(&self, slot: SlotIndex) -> SlotIndex {
        if slot < self.genesis_slot {
            return 0;
        }
        slot - self.epoch_start(self.epoch_from_slot(slot))
    }
}
