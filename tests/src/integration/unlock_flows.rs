//! # Unlock Flows
//!
//! Signed transactions built end to end, checking the unlock list and that
//! every signature verifies against the transaction's signing message.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{input, output_id, Wallet, CREATION_SLOT};
    use ml_02_transaction_builder::{BuilderError, InputSpec, SigningMode};
    use shared_crypto::{Ed25519PublicKey, Ed25519Signature as RawSignature};
    use shared_types::{
        AccountAddress, AccountId, Address, AddressCapabilities, ChainId, NftAddress, NftId, Output,
        Signature, SignedTransaction, Unlock,
    };

    fn verify_signatures(signed: &SignedTransaction) {
        let message = signed.transaction.signing_message().unwrap();
        for unlock in &signed.unlocks {
            if let Unlock::Signature(Signature::Ed25519(sig)) = unlock {
                let public_key = Ed25519PublicKey::from_bytes(sig.public_key).unwrap();
                public_key
                    .verify(&message, &RawSignature::from_bytes(sig.signature))
                    .unwrap();
            }
        }
    }

    #[test]
    fn test_plain_and_restricted_inputs_share_one_signature() {
        let wallet = Wallet::new(2);
        let alice = wallet.address(0);
        let bob = wallet.address(1);
        let restricted_alice = alice.clone().restricted(AddressCapabilities::all());

        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(10, 0, alice.clone()), alice.clone()))
            .add_input(input(1, Output::basic(10, 0, bob.clone()), bob.clone()))
            .add_input(input(
                2,
                Output::basic(10, 0, restricted_alice.clone()),
                restricted_alice,
            ))
            .add_input(input(3, Output::basic(10, 0, bob.clone()), bob))
            .add_output(Output::basic(40, 0, alice));

        let signed = b.build().unwrap();
        assert_eq!(signed.unlocks.len(), 4);
        assert_eq!(signed.signature_unlock_count(), 2);
        assert_eq!(signed.unlocks[2], Unlock::Reference { reference: 0 });
        assert_eq!(signed.unlocks[3], Unlock::Reference { reference: 1 });
        verify_signatures(&signed);
    }

    #[test]
    fn test_account_then_owned_input() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let account_id = AccountId([0x42; 32]);
        let account_address = Address::Account(AccountAddress(account_id));

        let mut b = wallet.builder();
        b.add_input(input(
            0,
            Output::account(100, 0, account_id, alice.clone()),
            alice.clone(),
        ))
        .add_input(input(
            1,
            Output::basic(100, 0, account_address.clone()),
            account_address,
        ))
        .add_output(Output::account(200, 0, account_id, alice));

        let signed = b.build().unwrap();
        assert!(signed.unlocks[0].is_signature());
        assert_eq!(signed.unlocks[1], Unlock::Account { reference: 0 });
        verify_signatures(&signed);
    }

    #[test]
    fn test_new_nft_unlocks_owned_input() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let nft_input = input(0, Output::nft(100, 0, NftId::EMPTY, alice.clone()), alice.clone());
        let nft_address = Address::Nft(NftAddress(NftId::from_output_id(&nft_input.output_id)));

        let mut b = wallet.builder();
        b.add_input(nft_input)
            .add_input(input(1, Output::basic(100, 0, nft_address.clone()), nft_address))
            .add_output(Output::basic(200, 0, alice));

        let signed = b.build().unwrap();
        assert_eq!(signed.unlocks[1], Unlock::Nft { reference: 0 });
    }

    #[test]
    fn test_nft_owned_input_ordered_first_is_rejected() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let nft_id = NftId([0x11; 32]);
        let nft_address = Address::Nft(NftAddress(nft_id));

        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(100, 0, nft_address.clone()), nft_address))
            .add_input(input(1, Output::nft(100, 0, nft_id, alice.clone()), alice));

        assert_eq!(
            b.build(),
            Err(BuilderError::ChainNotUnlocked {
                input_index: 0,
                chain: ChainId::Nft(nft_id),
            })
        );
    }

    #[test]
    fn test_placeholder_build_has_real_shape() {
        let wallet = Wallet::new(2);
        let alice = wallet.address(0);
        let bob = wallet.address(1);

        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(10, 0, alice.clone()), alice.clone()))
            .add_input(InputSpec {
                output_id: output_id(CREATION_SLOT, 1),
                output: Output::basic(10, 0, bob.clone()),
                unlock_target: bob,
            })
            .add_output(Output::basic(20, 0, alice));

        let placeholder = b.build_with(SigningMode::Empty).unwrap();
        let signed = b.build().unwrap();
        assert_eq!(placeholder.size().unwrap(), signed.size().unwrap());
        assert_eq!(placeholder.transaction, signed.transaction);
    }
}
