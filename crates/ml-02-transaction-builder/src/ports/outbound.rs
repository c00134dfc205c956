//! # Outbound Ports (Driven Ports / SPI)
//!
//! The builder never holds private keys. Signatures are requested from an
//! [`AddressSigner`] keyed by the address that owns an input.

use shared_types::{Address, AddressKind, SignerUid, Signature};
use thiserror::Error;

/// Errors from signer implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    /// The signer cannot produce signatures for this kind of address.
    #[error("Signer does not support {0} addresses")]
    UnsupportedAddress(AddressKind),

    /// No key is held for the address.
    #[error("No key for address {0}")]
    KeyNotFound(String),

    /// The backing key store failed.
    #[error("Signer failure: {0}")]
    Backend(String),
}

/// Produces unlock signatures for input-owning addresses.
///
/// Addresses that share a key must report the same signer UID. The unlock
/// resolver relies on it to emit one signature per key and reference
/// unlocks for every further input owned by that key.
pub trait AddressSigner {
    /// Stable identity of the key behind `address`.
    fn signer_uid_for_address(&self, address: &Address) -> Result<SignerUid, SignerError>;

    /// Signs `message` with the key behind `address`.
    fn sign(&self, address: &Address, message: &[u8]) -> Result<Signature, SignerError>;

    /// A signature of the right shape and size carrying no valid proof.
    /// Used to size transactions before they are signed for real.
    fn empty_signature_for_address(&self, address: &Address) -> Result<Signature, SignerError>;
}

impl<T: AddressSigner + ?Sized> AddressSigner for &T {
    fn signer_uid_for_address(&self, address: &Address) -> Result<SignerUid, SignerError> {
        (**self).signer_uid_for_address(address)
    }

    fn sign(&self, address: &Address, message: &[u8]) -> Result<Signature, SignerError> {
        (**self).sign(address, message)
    }

    fn empty_signature_for_address(&self, address: &Address) -> Result<Signature, SignerError> {
        (**self).empty_signature_for_address(address)
    }
}
