//! # Mana Flows
//!
//! Decay and generation through the public [`ml_01_mana::Api`], across
//! epoch boundaries and past the end of the decay table.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::super::fixtures::{output_id, Wallet};
    use ml_01_mana::ManaError;
    use shared_types::{AccountId, Output, SlotIndex};

    fn epoch_length(wallet: &Wallet) -> SlotIndex {
        wallet.api.time_provider().epoch_duration_slots() as SlotIndex
    }

    #[test]
    fn test_decay_folds_past_table_horizon() {
        let wallet = Wallet::new(1);
        let provider = wallet.api.mana_decay_provider();
        let horizon = wallet.api.protocol_parameters().mana_parameters.decay_factors.len() as u32;
        let value = 1u64 << 40;

        let folded = provider.decay(provider.decay(value, horizon), 5);
        assert_eq!(provider.decay(value, horizon + 5), folded);
        assert!(folded < provider.decay(value, horizon));
    }

    #[test]
    fn test_same_epoch_generation_is_linear_in_slots() {
        let wallet = Wallet::new(1);
        let provider = wallet.api.mana_decay_provider();

        let potential = provider
            .generate_mana_and_decay_by_slots(1_000_000_000, 10, 16)
            .unwrap();
        assert_eq!(potential, provider.generate_mana(1_000_000_000, 6));
    }

    #[test]
    fn test_potential_across_epochs_is_below_undecayed() {
        let wallet = Wallet::new(1);
        let provider = wallet.api.mana_decay_provider();
        let epoch = epoch_length(&wallet);
        let amount = 5_000_000_000;

        for epochs in [1, 2, 10, 400] {
            let target = 3 + epochs * epoch;
            let potential = provider
                .generate_mana_and_decay_by_slots(amount, 3, target)
                .unwrap();
            let undecayed = provider.generate_mana(amount, target - 3);
            assert!(potential <= undecayed, "epochs {epochs}: {potential} > {undecayed}");
            assert!(potential > 0);
        }
    }

    #[test]
    fn test_target_before_creation_rejected() {
        let wallet = Wallet::new(1);
        let provider = wallet.api.mana_decay_provider();
        let epoch = epoch_length(&wallet);

        assert!(matches!(
            provider.generate_mana_and_decay_by_slots(1, 2 * epoch, epoch),
            Err(ManaError::WrongEpochIndex { .. })
        ));
        assert!(matches!(
            provider.decay_mana_by_slots(1, 2 * epoch, epoch),
            Err(ManaError::WrongEpochIndex { .. })
        ));
        assert!(matches!(
            provider.generate_mana_and_decay_by_slots(1, 9, 8),
            Err(ManaError::WrongSlotIndex { .. })
        ));
    }

    #[test]
    fn test_stored_mana_decays_per_epoch_only() {
        let wallet = Wallet::new(1);
        let accountant = wallet.api.mana_balance_accountant();
        let epoch = epoch_length(&wallet);
        let owner = wallet.address(0);
        let id = output_id(1, 0);
        let output = Output::basic(0, 1_000_000, owner);

        let same_epoch = accountant
            .available_mana_inputs(epoch - 1, [(&id, &output)], 0)
            .unwrap();
        assert_eq!(same_epoch.stored_mana, 1_000_000);

        let next_epoch = accountant
            .available_mana_inputs(epoch, [(&id, &output)], 0)
            .unwrap();
        assert!(next_epoch.stored_mana < 1_000_000);
        assert!(next_epoch.account_bound_mana.is_empty());
        assert!(!next_epoch.account_bound_mana.contains_key(&AccountId::EMPTY));
    }

    proptest! {
        #[test]
        fn prop_decay_non_increasing_in_epochs(value in any::<u64>(), a in 0u32..1_000, b in 0u32..1_000) {
            let wallet = Wallet::new(1);
            let provider = wallet.api.mana_decay_provider();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            prop_assert!(provider.decay(value, high) <= provider.decay(value, low));
            prop_assert!(provider.decay(value, low) <= value);
        }

        #[test]
        fn prop_decay_non_increasing_in_value(a in any::<u64>(), b in any::<u64>(), epochs in 0u32..800) {
            let wallet = Wallet::new(1);
            let provider = wallet.api.mana_decay_provider();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };

            prop_assert!(provider.decay(low, epochs) <= provider.decay(high, epochs));
        }
    }
}
