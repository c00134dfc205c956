//! Unlock conditions attached to outputs.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::identifiers::{BaseToken, SlotIndex};

/// Returns part of the deposit to `return_address` when consumed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDepositReturn {
    pub return_address: Address,
    pub amount: BaseToken,
}

/// Output cannot be consumed before `slot`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timelock {
    pub slot: SlotIndex,
}

/// Ownership moves to `return_address` from `slot` on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub return_address: Address,
    pub slot: SlotIndex,
}

/// The set of unlock conditions on one output. At most one of each kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockConditionSet {
    pub address: Option<Address>,
    pub storage_deposit_return: Option<StorageDepositReturn>,
    pub timelock: Option<Timelock>,
    pub expiration: Option<Expiration>,
    pub state_controller_address: Option<Address>,
    pub governor_address: Option<Address>,
    pub immutable_account_address: Option<Address>,
}

impl UnlockConditionSet {
    /// Set holding just an address unlock condition.
    pub fn with_address(address: Address) -> Self {
        Self {
            address: Some(address),
            ..Self::default()
        }
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn timelock_slot(&self) -> Option<SlotIndex> {
        self.timelock.map(|t| t.slot)
    }

    /// True if a timelock keeps the output locked at least until `slot`.
    pub fn has_timelock_until(&self, slot: SlotIndex) -> bool {
        self.timelock.map(|t| t.slot >= slot).unwrap_or(false)
    }

    /// Number of conditions present.
    pub fn len(&self) -> usize {
        [
            self.address.is_some(),
            self.storage_deposit_return.is_some(),
            self.timelock.is_some(),
            self.expiration.is_some(),
            self.state_controller_address.is_some(),
            self.governor_address.is_some(),
            self.immutable_account_address.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
