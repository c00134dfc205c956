//! # Error Types
//!
//! Defines error types shared by the mana engine and the transaction builder.

use thiserror::Error;

/// Checked arithmetic failures.
///
/// Mana accounting must never wrap or clamp: every node has to reach the same
/// result, so an overflow is surfaced instead of being absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// `lhs + rhs` does not fit in 64 bits.
    #[error("Addition overflow: {lhs} + {rhs}")]
    AdditionOverflow { lhs: u64, rhs: u64 },

    /// `lhs - rhs` would go below zero.
    #[error("Subtraction underflow: {lhs} - {rhs}")]
    SubtractionUnderflow { lhs: u64, rhs: u64 },

    /// `lhs * rhs` does not fit in 64 bits.
    #[error("Multiplication overflow: {lhs} * {rhs}")]
    MultiplicationOverflow { lhs: u64, rhs: u64 },
}

/// Errors raised while loading or validating protocol parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParametersError {
    /// The parameter file could not be read.
    #[error("Failed to read protocol parameters: {0}")]
    Io(String),

    /// The parameter document is not valid JSON for [`crate::ProtocolParameters`].
    #[error("Failed to parse protocol parameters: {0}")]
    Parse(String),

    /// A decay factor does not fit the 32-bit fixed-point multiplication.
    #[error("Decay factor at index {index} exceeds 32 bits: {value}")]
    DecayFactorTooLarge { index: usize, value: u64 },

    /// `decay_factor_epochs_sum * generation_rate` exceeds 32 bits.
    #[error("Decay factor epochs sum {sum} times generation rate {rate} exceeds 32 bits")]
    EpochsSumFactorTooLarge { sum: u32, rate: u8 },

    /// A scaling exponent is outside its supported range.
    #[error("Invalid exponent {name}: {value}")]
    InvalidExponent { name: &'static str, value: u8 },

    /// Slot duration must be non-zero.
    #[error("Slot duration must be greater than zero")]
    ZeroSlotDuration,
}

/// The canonical encoder rejected a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Encoding failed: {0}")]
pub struct EncodingError(pub String);

impl From<bincode::Error> for EncodingError {
    fn from(err: bincode::Error) -> Self {
        Self(err.to_string())
    }
}

/// Errors raised while computing the work score of a payload or block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkScoreError {
    /// The payload could not be measured by the encoder.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Checked arithmetic failed while summing the score.
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}
