//! # In-Memory Address Signer
//!
//! Holds Ed25519 key pairs keyed by the address they control. Plain Ed25519,
//! implicit account creation and restricted forms of an address all resolve
//! to the same key and report the same signer UID.

use std::collections::HashMap;

use shared_crypto::Ed25519KeyPair;
use shared_types::{Address, Ed25519Address, Ed25519Signature, SignerUid, Signature};
use tracing::trace;

use crate::ports::outbound::{AddressSigner, SignerError};

#[derive(Debug, Default)]
pub struct InMemoryAddressSigner {
    keys: HashMap<Ed25519Address, Ed25519KeyPair>,
}

impl InMemoryAddressSigner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signer holding one key per seed.
    pub fn from_seeds<I>(seeds: I) -> Self
    where
        I: IntoIterator<Item = [u8; 32]>,
    {
        let mut signer = Self::new();
        for seed in seeds {
            signer.add_key(Ed25519KeyPair::from_seed(seed));
        }
        signer
    }

    /// Stores `key_pair` and returns the address it controls.
    pub fn add_key(&mut self, key_pair: Ed25519KeyPair) -> Ed25519Address {
        let address = Ed25519Address::from_public_key(key_pair.public_key().as_bytes());
        self.keys.insert(address, key_pair);
        address
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn key_hash(address: &Address) -> Result<&Ed25519Address, SignerError> {
        address
            .ed25519()
            .ok_or_else(|| SignerError::UnsupportedAddress(address.unwrap_restricted().kind()))
    }

    fn key_for(&self, address: &Address) -> Result<&Ed25519KeyPair, SignerError> {
        let key_hash = Self::key_hash(address)?;
        self.keys
            .get(key_hash)
            .ok_or_else(|| SignerError::KeyNotFound(SignerUid(key_hash.0).to_string()))
    }
}

impl AddressSigner for InMemoryAddressSigner {
    fn signer_uid_for_address(&self, address: &Address) -> Result<SignerUid, SignerError> {
        Ok(SignerUid(Self::key_hash(address)?.0))
    }

    fn sign(&self, address: &Address, message: &[u8]) -> Result<Signature, SignerError> {
        let key_pair = self.key_for(address)?;
        let signature = key_pair.sign(message);
        trace!(kind = %address.kind(), "signed message");
        Ok(Signature::Ed25519(Ed25519Signature {
            public_key: *key_pair.public_key().as_bytes(),
            signature: *signature.as_bytes(),
        }))
    }

    fn empty_signature_for_address(&self, address: &Address) -> Result<Signature, SignerError> {
        let key_pair = self.key_for(address)?;
        Ok(Signature::Ed25519(Ed25519Signature::empty(
            *key_pair.public_key().as_bytes(),
        )))
    }
}
