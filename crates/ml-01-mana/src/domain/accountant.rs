//! # Mana Balance Accountant
//!
//! Computes how much mana a transaction draft has at its disposal.
//!
//! Mana coming from account inputs, and mana that outputs lock to an
//! account, is tracked per account ("account bound"). Everything else forms
//! one unbound pool. Account-bound mana is either stored back on an output of
//! the same account or allotted to that account.

use std::collections::BTreeMap;

use shared_types::safemath::{safe_add, safe_sub};
use shared_types::{AccountId, Address, Mana, Output, OutputId, SlotIndex, Transaction};
use tracing::trace;

use super::decay::ManaDecayProvider;
use super::errors::ManaError;

/// Mana available to a transaction draft at a target slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AvailableManaResult {
    /// `potential_mana + stored_mana`.
    pub total_mana: Mana,
    /// Unbound potential, unbound stored and rewards.
    pub unbound_mana: Mana,
    pub potential_mana: Mana,
    pub stored_mana: Mana,
    pub unbound_potential_mana: Mana,
    pub unbound_stored_mana: Mana,
    pub rewards: Mana,
    pub account_bound_mana: BTreeMap<AccountId, Mana>,
}

impl AvailableManaResult {
    fn add_account_bound(&mut self, account_id: AccountId, mana: Mana) -> Result<(), ManaError> {
        let entry = self.account_bound_mana.entry(account_id).or_insert(0);
        *entry = safe_add(*entry, mana)?;
        Ok(())
    }

    /// Takes `mana` from the account's bound balance. A shortfall is covered
    /// by the unbound pool and the exhausted entry is removed.
    fn sub_account_bound(&mut self, account_id: AccountId, mana: Mana) -> Result<(), ManaError> {
        let bound = self.account_bound_mana.get(&account_id).copied().unwrap_or(0);
        if mana < bound {
            self.account_bound_mana.insert(account_id, bound - mana);
            return Ok(());
        }

        self.account_bound_mana.remove(&account_id);
        let shortfall = mana - bound;
        if shortfall > 0 {
            self.unbound_mana = safe_sub(self.unbound_mana, shortfall)?;
        }
        Ok(())
    }

    fn sub_unbound(&mut self, mana: Mana) -> Result<(), ManaError> {
        self.unbound_mana = safe_sub(self.unbound_mana, mana)?;
        Ok(())
    }

    /// Mana bound to `account_id`, zero if none.
    pub fn account_bound(&self, account_id: &AccountId) -> Mana {
        self.account_bound_mana.get(account_id).copied().unwrap_or(0)
    }
}

/// Aggregates available mana for transaction drafts.
#[derive(Clone, Copy, Debug)]
pub struct ManaBalanceAccountant<'a> {
    decay_provider: &'a ManaDecayProvider,
    max_committable_age: SlotIndex,
}

impl<'a> ManaBalanceAccountant<'a> {
    pub fn new(decay_provider: &'a ManaDecayProvider, max_committable_age: SlotIndex) -> Self {
        Self {
            decay_provider,
            max_committable_age,
        }
    }

    /// Potential plus decayed stored mana of `inputs` at `target_slot`, plus `rewards`.
    pub fn available_mana_inputs<'o, I>(
        &self,
        target_slot: SlotIndex,
        inputs: I,
        rewards: Mana,
    ) -> Result<AvailableManaResult, ManaError>
    where
        I: IntoIterator<Item = (&'o OutputId, &'o Output)>,
    {
        let mut result = AvailableManaResult::default();

        for (output_id, output) in inputs {
            let creation_slot = output_id.creation_slot();
            let potential = self.decay_provider.generate_mana_and_decay_by_slots(
                output.base_token_amount(),
                creation_slot,
                target_slot,
            )?;
            let stored =
                self.decay_provider
                    .decay_mana_by_slots(output.stored_mana(), creation_slot, target_slot)?;

            result.potential_mana = safe_add(result.potential_mana, potential)?;
            result.stored_mana = safe_add(result.stored_mana, stored)?;

            if let Output::Account(account) = output {
                let account_id = if account.account_id.is_empty() {
                    AccountId::from_output_id(output_id)
                } else {
                    account.account_id
                };
                trace!(%output_id, %account_id, potential, stored, "account-bound input mana");
                result.add_account_bound(account_id, safe_add(potential, stored)?)?;
            } else {
                trace!(%output_id, potential, stored, "unbound input mana");
                result.unbound_potential_mana = safe_add(result.unbound_potential_mana, potential)?;
                result.unbound_stored_mana = safe_add(result.unbound_stored_mana, stored)?;
                result.unbound_mana = safe_add(result.unbound_mana, safe_add(potential, stored)?)?;
            }
        }

        result.rewards = rewards;
        result.unbound_mana = safe_add(result.unbound_mana, rewards)?;
        result.total_mana = safe_add(result.potential_mana, result.stored_mana)?;
        Ok(result)
    }

    /// Mana still unassigned after the draft's outputs and allotments.
    pub fn available_mana_remaining<'o, I>(
        &self,
        target_slot: SlotIndex,
        inputs: I,
        rewards: Mana,
        transaction: &Transaction,
    ) -> Result<AvailableManaResult, ManaError>
    where
        I: IntoIterator<Item = (&'o OutputId, &'o Output)>,
    {
        let mut result = self.available_mana_inputs(target_slot, inputs, rewards)?;

        for output in &transaction.outputs {
            let mana = output.stored_mana();
            match self.mana_lock_account(output, transaction.creation_slot) {
                Some(account_id) => result.sub_account_bound(account_id, mana)?,
                None => result.sub_unbound(mana)?,
            }
        }

        for allotment in &transaction.allotments {
            result.sub_account_bound(allotment.account_id, allotment.mana)?;
        }

        Ok(result)
    }

    /// The account an output's stored mana is bound to, if any.
    ///
    /// Account outputs bind to themselves. Other outputs bind to the account
    /// in their address unlock condition when timelocked past the point the
    /// account could commit the transaction. The address must be an account
    /// address itself; a restricted wrapper does not count.
    pub fn mana_lock_account(&self, output: &Output, creation_slot: SlotIndex) -> Option<AccountId> {
        if let Output::Account(account) = output {
            return Some(account.account_id);
        }

        let conditions = output.unlock_conditions();
        let lock_until = creation_slot.saturating_add(self.max_committable_age);
        if !conditions.has_timelock_until(lock_until) {
            return None;
        }
        match conditions.address() {
            Some(Address::Account(address)) => Some(address.0),
            _ => None,
        }
    }
}
