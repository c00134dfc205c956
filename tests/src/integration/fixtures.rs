//! Shared setup for the integration scenarios.

use std::sync::Arc;

use ml_01_mana::Api;
use ml_02_transaction_builder::{InMemoryAddressSigner, InputSpec, TransactionBuilder};
use shared_crypto::Ed25519KeyPair;
use shared_types::{Address, Output, OutputId, ProtocolParameters, SlotIndex, TransactionId};

/// Slot every fixture draft is created in.
pub const CREATION_SLOT: SlotIndex = 100;

/// An API over default parameters and a signer holding `keys` seeded keys.
pub struct Wallet {
    pub api: Arc<Api>,
    pub signer: InMemoryAddressSigner,
    pub addresses: Vec<Address>,
}

impl Wallet {
    pub fn new(keys: u8) -> Self {
        let api = Arc::new(
            Api::new(ProtocolParameters::default()).expect("default parameters are valid"),
        );
        let mut signer = InMemoryAddressSigner::new();
        let addresses = (1..=keys)
            .map(|seed| Address::Ed25519(signer.add_key(Ed25519KeyPair::from_seed([seed; 32]))))
            .collect();
        Self {
            api,
            signer,
            addresses,
        }
    }

    pub fn address(&self, index: usize) -> Address {
        self.addresses[index].clone()
    }

    /// A builder with its creation slot set to [`CREATION_SLOT`].
    pub fn builder(&self) -> TransactionBuilder<&InMemoryAddressSigner> {
        let mut builder = TransactionBuilder::new(self.api.clone(), &self.signer);
        builder.set_creation_slot(CREATION_SLOT);
        builder
    }
}

/// Output id of the `index`-th output of a transaction from `slot`.
pub fn output_id(slot: SlotIndex, index: u16) -> OutputId {
    let mut hash = [0xA0; 32];
    hash[..2].copy_from_slice(&index.to_le_bytes());
    OutputId::new(TransactionId::new(hash, slot), index)
}

/// Input created at `slot`, authorized by `unlock_target`.
pub fn input_at(slot: SlotIndex, index: u16, output: Output, unlock_target: Address) -> InputSpec {
    InputSpec {
        output_id: output_id(slot, index),
        output,
        unlock_target,
    }
}

/// Input created at [`CREATION_SLOT`], authorized by the output's own owner.
pub fn input(index: u16, output: Output, unlock_target: Address) -> InputSpec {
    input_at(CREATION_SLOT, index, output, unlock_target)
}
