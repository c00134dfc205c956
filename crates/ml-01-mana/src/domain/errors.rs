//! # Mana Errors

use shared_types::{ArithmeticError, EpochIndex, ParametersError, SlotIndex};
use thiserror::Error;

/// Errors from mana decay, generation and accounting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManaError {
    /// The creation epoch lies after the target epoch.
    #[error("Creation epoch {creation} is after target epoch {target}")]
    WrongEpochIndex {
        creation: EpochIndex,
        target: EpochIndex,
    },

    /// The creation slot lies after the target slot.
    #[error("Creation slot {creation} is after target slot {target}")]
    WrongSlotIndex {
        creation: SlotIndex,
        target: SlotIndex,
    },

    /// Checked arithmetic failed.
    #[error("Mana arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// The protocol parameters cannot drive the fixed-point math.
    #[error("Invalid mana parameters: {0}")]
    Parameters(#[from] ParametersError),
}
