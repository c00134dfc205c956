//! # Unlock Resolver
//!
//! Turns the ordered inputs of a finished transaction into one unlock per
//! input, in a single pass:
//!
//! ```text
//! owner (restricted unwrapped)
//!   ├── account / anchor / nft ──→ chain unlocked earlier? ──→ Account/Anchor/Nft { reference }
//!   │                                       └── no ──→ ChainNotUnlocked
//!   ├── ed25519 / implicit ──────→ key signed earlier? ──→ Reference { reference }
//!   │                                       └── no ──→ Signature (recorded)
//!   └── anything else ───────────→ UnsupportedAddress
//! ```
//!
//! After an input is unlocked, the chain its output carries (if addressable)
//! counts as unlocked at that index.

use std::collections::HashMap;

use shared_types::{Address, ChainId, Output, OutputId, SignerUid, Transaction, Unlock};
use tracing::{debug, trace};

use super::errors::BuilderError;
use crate::ports::outbound::AddressSigner;

/// Whether unlocks carry real signatures or size-equivalent placeholders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SigningMode {
    #[default]
    Sign,
    /// Placeholder signatures, for estimating size and work score.
    Empty,
}

/// One input as the resolver sees it.
#[derive(Clone, Copy, Debug)]
pub struct ResolvedInput<'a> {
    pub output_id: &'a OutputId,
    pub output: &'a Output,
    /// Address the caller asserted must authorize the input.
    pub owner: &'a Address,
}

/// Unlocks produced so far and who produced them. Lives for one resolution.
#[derive(Default)]
struct UnlockedSet {
    unlocks: Vec<Unlock>,
    signers: HashMap<SignerUid, u16>,
    chains: HashMap<ChainId, u16>,
}

pub struct UnlockResolver<'s, S> {
    signer: &'s S,
    mode: SigningMode,
}

impl<'s, S: AddressSigner> UnlockResolver<'s, S> {
    pub fn new(signer: &'s S, mode: SigningMode) -> Self {
        Self { signer, mode }
    }

    /// Resolves `inputs`, which must be in transaction input order.
    pub fn resolve(
        &self,
        transaction: &Transaction,
        inputs: &[ResolvedInput<'_>],
    ) -> Result<Vec<Unlock>, BuilderError> {
        if inputs.len() > usize::from(u16::MAX) + 1 {
            return Err(BuilderError::TooManyInputs(inputs.len()));
        }

        let signing_message = match self.mode {
            SigningMode::Sign => Some(transaction.signing_message()?),
            SigningMode::Empty => None,
        };

        let mut set = UnlockedSet {
            unlocks: Vec::with_capacity(inputs.len()),
            ..UnlockedSet::default()
        };

        for (input_index, input) in inputs.iter().enumerate() {
            // bounded by the length check above
            let index = input_index as u16;
            let owner = input.owner.unwrap_restricted();

            let unlock = if let Some(chain) = owner.chain_id() {
                let reference = *set
                    .chains
                    .get(&chain)
                    .ok_or(BuilderError::ChainNotUnlocked { input_index, chain })?;
                trace!(input_index, %chain, reference, "chain unlock");
                chain_unlock(&chain, reference).ok_or(BuilderError::UnsupportedAddress {
                    input_index,
                    kind: owner.kind(),
                })?
            } else if owner.is_directly_unlockable() {
                let uid = self.signer.signer_uid_for_address(owner)?;
                match set.signers.get(&uid) {
                    Some(&reference) => {
                        trace!(input_index, reference, "signature reference unlock");
                        Unlock::Reference { reference }
                    }
                    None => {
                        let signature = match &signing_message {
                            Some(message) => self.signer.sign(owner, message)?,
                            None => self.signer.empty_signature_for_address(owner)?,
                        };
                        set.signers.insert(uid, index);
                        trace!(input_index, signer = %uid, "signature unlock");
                        Unlock::Signature(signature)
                    }
                }
            } else {
                return Err(BuilderError::UnsupportedAddress {
                    input_index,
                    kind: owner.kind(),
                });
            };
            set.unlocks.push(unlock);

            if let Some(chain) = input.output.chain_id() {
                let chain = chain.or_from_output_id(input.output_id);
                if chain.is_addressable() {
                    set.chains.entry(chain).or_insert(index);
                }
            }
        }

        debug!(
            inputs = inputs.len(),
            signatures = set.signers.len(),
            mode = ?self.mode,
            "unlocks resolved"
        );
        Ok(set.unlocks)
    }
}

/// Chain unlock referencing the input that unlocked `chain`. Foundry and
/// delegation chains cannot own outputs, so they have none.
fn chain_unlock(chain: &ChainId, reference: u16) -> Option<Unlock> {
    match chain {
        ChainId::Account(_) => Some(Unlock::Account { reference }),
        ChainId::Anchor(_) => Some(Unlock::Anchor { reference }),
        ChainId::Nft(_) => Some(Unlock::Nft { reference }),
        ChainId::Foundry(_) | ChainId::Delegation(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAddressSigner;
    use crate::ports::outbound::SignerError;
    use proptest::prelude::*;
    use shared_crypto::Ed25519KeyPair;
    use shared_types::{
        AccountId, AddressCapabilities, AddressKind, AnchorId, DelegationId, Ed25519Address,
        FoundryId, MultiAddress, NftAddress, NftId, TransactionId, WeightedAddress,
    };

    struct Fixture {
        signer: InMemoryAddressSigner,
        alice: Address,
        bob: Address,
    }

    fn fixture() -> Fixture {
        let mut signer = InMemoryAddressSigner::new();
        let alice = Address::Ed25519(signer.add_key(Ed25519KeyPair::from_seed([1; 32])));
        let bob = Address::Ed25519(signer.add_key(Ed25519KeyPair::from_seed([2; 32])));
        Fixture { signer, alice, bob }
    }

    fn output_id(index: u16) -> OutputId {
        OutputId::new(TransactionId::new([7; 32], 1), index)
    }

    fn resolve(
        signer: &InMemoryAddressSigner,
        inputs: &[(OutputId, Output, Address)],
    ) -> Result<Vec<Unlock>, BuilderError> {
        let resolved: Vec<_> = inputs
            .iter()
            .map(|(id, output, owner)| ResolvedInput {
                output_id: id,
                output,
                owner,
            })
            .collect();
        UnlockResolver::new(signer, SigningMode::Sign).resolve(&Transaction::default(), &resolved)
    }

    #[test]
    fn test_one_signature_per_key() {
        let f = fixture();
        let inputs = vec![
            (output_id(0), Output::basic(1, 0, f.alice.clone()), f.alice.clone()),
            (output_id(1), Output::basic(1, 0, f.bob.clone()), f.bob.clone()),
            (output_id(2), Output::basic(1, 0, f.alice.clone()), f.alice.clone()),
        ];

        let unlocks = resolve(&f.signer, &inputs).unwrap();
        assert!(unlocks[0].is_signature());
        assert!(unlocks[1].is_signature());
        assert_eq!(unlocks[2], Unlock::Reference { reference: 0 });
    }

    #[test]
    fn test_restricted_address_shares_signature() {
        let f = fixture();
        let restricted = f.alice.clone().restricted(AddressCapabilities::all());
        let inputs = vec![
            (output_id(0), Output::basic(1, 0, f.alice.clone()), f.alice.clone()),
            (output_id(1), Output::basic(1, 0, restricted.clone()), restricted),
        ];

        let unlocks = resolve(&f.signer, &inputs).unwrap();
        assert_eq!(unlocks.len(), 2);
        assert!(unlocks[0].is_signature());
        assert_eq!(unlocks[1], Unlock::Reference { reference: 0 });
    }

    #[test]
    fn test_nft_owned_input_after_nft() {
        let f = fixture();
        let nft_output_id = output_id(0);
        let nft_id = NftId::from_output_id(&nft_output_id);
        let nft_address = Address::Nft(NftAddress(nft_id));
        let inputs = vec![
            (
                nft_output_id,
                Output::nft(1, 0, NftId::EMPTY, f.alice.clone()),
                f.alice.clone(),
            ),
            (output_id(1), Output::basic(1, 0, nft_address.clone()), nft_address),
        ];

        let unlocks = resolve(&f.signer, &inputs).unwrap();
        assert!(unlocks[0].is_signature());
        assert_eq!(unlocks[1], Unlock::Nft { reference: 0 });
    }

    #[test]
    fn test_nft_owned_input_before_nft_fails() {
        let f = fixture();
        let nft_id = NftId([4; 32]);
        let nft_address = Address::Nft(NftAddress(nft_id));
        let inputs = vec![
            (output_id(0), Output::basic(1, 0, nft_address.clone()), nft_address),
            (output_id(1), Output::nft(1, 0, nft_id, f.alice.clone()), f.alice.clone()),
        ];

        assert_eq!(
            resolve(&f.signer, &inputs),
            Err(BuilderError::ChainNotUnlocked {
                input_index: 0,
                chain: ChainId::Nft(nft_id),
            })
        );
    }

    #[test]
    fn test_multi_address_unsupported() {
        let f = fixture();
        let multi = Address::Multi(MultiAddress {
            addresses: vec![WeightedAddress {
                address: f.alice.clone(),
                weight: 1,
            }],
            threshold: 1,
        });
        let inputs = vec![(output_id(0), Output::basic(1, 0, multi.clone()), multi)];

        assert_eq!(
            resolve(&f.signer, &inputs),
            Err(BuilderError::UnsupportedAddress {
                input_index: 0,
                kind: AddressKind::Multi,
            })
        );
    }

    #[test]
    fn test_chain_unlock_per_chain_kind() {
        assert_eq!(
            chain_unlock(&ChainId::Account(AccountId([1; 32])), 2),
            Some(Unlock::Account { reference: 2 })
        );
        assert_eq!(
            chain_unlock(&ChainId::Anchor(AnchorId([1; 32])), 3),
            Some(Unlock::Anchor { reference: 3 })
        );
        assert_eq!(
            chain_unlock(&ChainId::Nft(NftId([1; 32])), 4),
            Some(Unlock::Nft { reference: 4 })
        );
        assert_eq!(chain_unlock(&ChainId::Foundry(FoundryId::default()), 0), None);
        assert_eq!(chain_unlock(&ChainId::Delegation(DelegationId([1; 32])), 0), None);
    }

    #[test]
    fn test_missing_key_aborts() {
        let f = fixture();
        let stranger = Address::Ed25519(Ed25519Address([0xCC; 32]));
        let inputs = vec![(output_id(0), Output::basic(1, 0, stranger.clone()), stranger)];

        assert!(matches!(
            resolve(&f.signer, &inputs),
            Err(BuilderError::Signer(SignerError::KeyNotFound(_)))
        ));
    }

    #[test]
    fn test_empty_mode_uses_placeholders() {
        let f = fixture();
        let output = Output::basic(1, 0, f.alice.clone());
        let id = output_id(0);
        let resolved = [ResolvedInput {
            output_id: &id,
            output: &output,
            owner: &f.alice,
        }];

        let unlocks = UnlockResolver::new(&f.signer, SigningMode::Empty)
            .resolve(&Transaction::default(), &resolved)
            .unwrap();
        match unlocks[0] {
            Unlock::Signature(shared_types::Signature::Ed25519(sig)) => assert!(sig.is_empty()),
            other => panic!("unexpected unlock {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_one_signature_per_distinct_key(owners in prop::collection::vec((0usize..3, any::<bool>()), 1..24)) {
            let mut signer = InMemoryAddressSigner::new();
            let keys: Vec<Address> = (1..=3u8)
                .map(|seed| Address::Ed25519(signer.add_key(Ed25519KeyPair::from_seed([seed; 32]))))
                .collect();

            let inputs: Vec<_> = owners
                .iter()
                .enumerate()
                .map(|(i, (key, restricted))| {
                    let owner = if *restricted {
                        keys[*key].clone().restricted(AddressCapabilities::all())
                    } else {
                        keys[*key].clone()
                    };
                    (output_id(i as u16), Output::basic(1, 0, owner.clone()), owner)
                })
                .collect();

            let unlocks = resolve(&signer, &inputs).unwrap();
            prop_assert_eq!(unlocks.len(), inputs.len());

            let mut distinct: Vec<usize> = owners.iter().map(|(key, _)| *key).collect();
            distinct.sort_unstable();
            distinct.dedup();
            prop_assert_eq!(unlocks.iter().filter(|u| u.is_signature()).count(), distinct.len());

            for (i, unlock) in unlocks.iter().enumerate() {
                if let Unlock::Reference { reference } = unlock {
                    let reference = usize::from(*reference);
                    prop_assert!(reference < i);
                    prop_assert!(unlocks[reference].is_signature());
                    prop_assert_eq!(owners[reference].0, owners[i].0);
                }
            }
        }
    }
}
