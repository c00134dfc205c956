//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Bytes do not decode to a valid Ed25519 point
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Seed has the wrong length
    #[error("Invalid seed length: expected 32, got {0}")]
    InvalidSeedLength(usize),
}
