//! # Builder Flows
//!
//! Allotment policies and block pricing through the fluent builder.

#[cfg(test)]
mod tests {
    use ledger_telemetry::{init_telemetry, TelemetryConfig, TelemetryError};

    use super::super::fixtures::{input, input_at, Wallet, CREATION_SLOT};
    use ml_02_transaction_builder::{BasicBlockBuilder, BuilderError};
    use shared_types::{
        mana_cost, AccountAddress, AccountId, Address, Output, Payload, Timelock,
    };

    const ISSUER: AccountId = AccountId([0x1E; 32]);

    #[test]
    fn test_allot_all_mana_after_six_slots() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);

        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(1_000_000_000, 0, alice.clone()), alice.clone()))
            .add_output(Output::basic(1_000_000_000, 0, alice))
            .allot_all_mana(CREATION_SLOT + 6, ISSUER, 20);

        let generated = wallet.api.mana_decay_provider().generate_mana(1_000_000_000, 6);
        let signed = b.build().unwrap();
        assert!(generated >= 20);
        assert_eq!(signed.transaction.allotments.len(), 1);
        assert_eq!(signed.transaction.allotments.get(&ISSUER), generated);

        let remaining = b.available_mana_remaining(CREATION_SLOT + 6).unwrap();
        assert_eq!(remaining.unbound_mana, 0);
    }

    #[test]
    fn test_allot_all_mana_short_is_deferred() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);

        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(1_000_000_000, 0, alice.clone()), alice.clone()))
            .allot_all_mana(CREATION_SLOT + 6, ISSUER, u64::MAX)
            .add_output(Output::basic(1_000_000_000, 0, alice));

        assert!(matches!(b.error(), Some(BuilderError::NotEnoughMana { .. })));
        assert!(b.transaction().outputs.is_empty());
        assert!(matches!(b.build(), Err(BuilderError::NotEnoughMana { .. })));
    }

    #[test]
    fn test_account_input_mana_stays_with_account() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let account_id = AccountId([0x0A; 32]);

        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(0, 700, alice.clone()), alice.clone()))
            .add_input(input(
                1,
                Output::account(0, 300, account_id, alice.clone()),
                alice.clone(),
            ))
            .add_output(Output::basic(0, 0, alice.clone()))
            .add_output(Output::account(0, 0, account_id, alice))
            .store_remaining_mana_in_output_and_allot_remaining_account_bound_mana(CREATION_SLOT, 1);

        let tx = b.transaction();
        assert_eq!(tx.outputs[1].stored_mana(), 1_000);
        assert!(tx.allotments.is_empty());
        assert!(b.build().is_ok());
    }

    #[test]
    fn test_timelocked_output_binds_mana_to_account() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let account_id = AccountId([0x0B; 32]);

        let mut locked = Output::basic(0, 200, Address::Account(AccountAddress(account_id)));
        let max_age = wallet.api.protocol_parameters().max_committable_age;
        locked.unlock_conditions_mut().timelock = Some(Timelock {
            slot: CREATION_SLOT + max_age,
        });

        let mut b = wallet.builder();
        b.add_input(input(
            0,
            Output::account(0, 500, account_id, alice.clone()),
            alice.clone(),
        ))
        .add_output(locked);

        let remaining = b.available_mana_remaining(CREATION_SLOT).unwrap();
        assert_eq!(remaining.account_bound(&account_id), 300);
        assert_eq!(remaining.unbound_mana, 0);

        let mut allotted = Vec::new();
        b.allot_remaining_account_bound_mana_with(CREATION_SLOT, &[], |id, mana| {
            allotted.push((id, mana))
        });
        assert_eq!(allotted, vec![(account_id, 300)]);
    }

    #[test]
    fn test_min_required_mana_covers_block_cost() {
        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let rmc = 5;

        let mut b = wallet.builder();
        b.add_input(input_at(
            1,
            0,
            Output::basic(10_000_000_000, 0, alice.clone()),
            alice.clone(),
        ))
        .add_output(Output::basic(10_000_000_000, 0, alice));

        let before = b.transaction().clone();
        let required = b.min_required_allotted_mana(rmc, ISSUER).unwrap();
        assert_eq!(b.transaction(), &before);
        assert!(required > 0);

        b.allot_min_required_mana_and_store_remaining_mana_in_output(CREATION_SLOT, rmc, ISSUER, 0);
        assert!(b.error().is_none());
        assert_eq!(b.transaction().allotments.get(&ISSUER), required);
        assert_eq!(b.min_required_allotted_mana(rmc, ISSUER).unwrap(), 0);
        assert_eq!(b.available_mana_remaining(CREATION_SLOT).unwrap().unbound_mana, 0);

        let signed = b.build().unwrap();
        let block = BasicBlockBuilder::new(wallet.api.clone(), ISSUER)
            .payload(Payload::SignedTransaction(Box::new(signed)))
            .calculate_and_set_max_burned_mana(rmc)
            .unwrap()
            .build();
        let work_score = block
            .work_score(&wallet.api.protocol_parameters().work_score_parameters)
            .unwrap();
        assert_eq!(block.max_burned_mana, mana_cost(rmc, work_score).unwrap());
        assert!(block.max_burned_mana <= required);
    }

    #[test]
    fn test_telemetry_installs_once() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::default()
        }
        .with_log_level("ml_02_transaction_builder=trace");

        init_telemetry(&config).unwrap();
        tracing::info!("telemetry test event");

        let wallet = Wallet::new(1);
        let alice = wallet.address(0);
        let mut b = wallet.builder();
        b.add_input(input(0, Output::basic(10, 0, alice.clone()), alice.clone()))
            .add_output(Output::basic(10, 0, alice));
        assert!(b.build().is_ok());

        assert!(matches!(
            init_telemetry(&config),
            Err(TelemetryError::SubscriberInit(_))
        ));
    }
}
