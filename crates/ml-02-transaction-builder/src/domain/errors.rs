//! # Builder Errors
//!
//! Mutators of the transaction builder never fail on the spot. The first
//! error is stored and every later mutator becomes a no-op; the error is
//! returned from `build()`.

use ml_01_mana::ManaError;
use shared_types::{
    AddressKind, ArithmeticError, ChainId, EncodingError, Mana, OutputId, OutputKind,
    WorkScoreError,
};
use thiserror::Error;

use crate::ports::outbound::SignerError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// Mana decay, generation or accounting failed.
    #[error(transparent)]
    Mana(#[from] ManaError),

    /// Checked arithmetic on builder state failed.
    #[error("Arithmetic failed: {0}")]
    Arithmetic(#[from] ArithmeticError),

    /// The signer could not produce an identity or signature.
    #[error("Signer failed: {0}")]
    Signer(#[from] SignerError),

    /// An input owned by a chain address comes before that chain's own input.
    #[error("Input {input_index} is owned by chain {chain} which is not unlocked by an earlier input")]
    ChainNotUnlocked { input_index: usize, chain: ChainId },

    /// The owning address cannot be unlocked by this builder.
    #[error("Input {input_index} is owned by an unsupported {kind} address")]
    UnsupportedAddress { input_index: usize, kind: AddressKind },

    /// Less mana is available than the caller demanded.
    #[error("Not enough mana: required {required}, available {available}")]
    NotEnoughMana { required: Mana, available: Mana },

    #[error("Output index {index} out of range ({outputs} outputs)")]
    OutputIndexOutOfRange { index: usize, outputs: usize },

    /// Foundry and delegation outputs do not store mana.
    #[error("Output {index} is a {kind} output and cannot hold mana")]
    OutputCannotHoldMana { index: usize, kind: OutputKind },

    /// An input listed in the transaction has no recorded output.
    #[error("Unknown input {0}")]
    UnknownInput(OutputId),

    /// Unlock references are 16 bits wide.
    #[error("Too many inputs: {0}")]
    TooManyInputs(usize),

    #[error(transparent)]
    WorkScore(#[from] WorkScoreError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),
}
