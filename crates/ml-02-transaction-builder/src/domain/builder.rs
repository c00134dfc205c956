//! # Transaction Builder
//!
//! Mutable draft of a transaction plus the mana policies that balance it.
//!
//! ## Deferred Errors
//!
//! Mutators return `&mut Self` so calls chain. The first failure is stored;
//! every later mutator is a no-op and [`TransactionBuilder::build`] returns
//! the stored error.
//!
//! ## Mana Policies
//!
//! | Method | Effect |
//! |--------|--------|
//! | `allot_remaining_account_bound_mana` | allot each account its bound mana |
//! | `allot_all_mana` | as above, plus all unbound mana to one account |
//! | `store_remaining_mana_in_output_and_allot_remaining_account_bound_mana` | unbound mana into an output, bound mana allotted |
//! | `allot_min_required_mana_and_store_remaining_mana_in_output` | issuer allotment for the block cost, rest stored |
//!
//! ## Finalization
//!
//! `build()` never mutates the draft. Allotments and context inputs are
//! sorted on a copy, the inputs commitment is derived from input order and
//! the unlock resolver runs over the copy. A builder can therefore be built
//! once with placeholder signatures for sizing and once for real.

use std::collections::HashMap;
use std::sync::Arc;

use ml_01_mana::{Api, AvailableManaResult};
use shared_types::safemath::safe_add;
use shared_types::{
    inputs_commitment, mana_cost, AccountId, Address, BlockIssuanceCreditInput, CommitmentInput,
    ContextInput, Mana, Output, OutputId, Payload, RewardInput, SignedTransaction, SlotIndex,
    TaggedData, Transaction, TransactionCapabilities, UtxoInput,
};
use tracing::{debug, warn};

use super::block_builder::BasicBlockBuilder;
use super::errors::BuilderError;
use super::unlock_resolver::{ResolvedInput, SigningMode, UnlockResolver};
use crate::ports::outbound::AddressSigner;

/// Placeholder allotted to the block issuer while sizing the transaction.
const PLACEHOLDER_ALLOTMENT: Mana = 1;

/// An output to consume and the address that must authorize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputSpec {
    pub output_id: OutputId,
    pub output: Output,
    pub unlock_target: Address,
}

pub struct TransactionBuilder<S> {
    api: Arc<Api>,
    signer: S,
    transaction: Transaction,
    inputs: HashMap<OutputId, Output>,
    input_owners: HashMap<OutputId, Address>,
    rewards: Mana,
    error: Option<BuilderError>,
}

impl<S: AddressSigner> TransactionBuilder<S> {
    pub fn new(api: Arc<Api>, signer: S) -> Self {
        let transaction = Transaction {
            network_id: api.protocol_parameters().network_id(),
            ..Transaction::default()
        };
        Self {
            api,
            signer,
            transaction,
            inputs: HashMap::new(),
            input_owners: HashMap::new(),
            rewards: 0,
            error: None,
        }
    }

    pub fn api(&self) -> &Arc<Api> {
        &self.api
    }

    /// The draft as assembled so far.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// The stored error, if a mutator failed.
    pub fn error(&self) -> Option<&BuilderError> {
        self.error.as_ref()
    }

    /// Runs `f` unless an error is stored, storing the error it returns.
    fn apply<F>(&mut self, operation: &'static str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Self) -> Result<(), BuilderError>,
    {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = f(self) {
            warn!(operation, error = %err, "transaction builder operation failed");
            self.error = Some(err);
        }
        self
    }

    pub fn add_input(&mut self, input: InputSpec) -> &mut Self {
        self.apply("add_input", |b| {
            b.transaction.inputs.push(UtxoInput {
                output_id: input.output_id,
            });
            b.input_owners.insert(input.output_id, input.unlock_target);
            b.inputs.insert(input.output_id, input.output);
            Ok(())
        })
    }

    pub fn add_output(&mut self, output: Output) -> &mut Self {
        self.apply("add_output", |b| {
            b.transaction.outputs.push(output);
            Ok(())
        })
    }

    pub fn add_commitment_input(&mut self, input: CommitmentInput) -> &mut Self {
        self.add_context_input("add_commitment_input", ContextInput::Commitment(input))
    }

    pub fn add_block_issuance_credit_input(&mut self, input: BlockIssuanceCreditInput) -> &mut Self {
        self.add_context_input(
            "add_block_issuance_credit_input",
            ContextInput::BlockIssuanceCredit(input),
        )
    }

    /// Adds a reward input claiming `mana` of rewards.
    pub fn add_reward_input(&mut self, input: RewardInput, mana: Mana) -> &mut Self {
        self.apply("add_reward_input", |b| {
            b.rewards = safe_add(b.rewards, mana)?;
            b.transaction.context_inputs.push(ContextInput::Reward(input));
            Ok(())
        })
    }

    fn add_context_input(&mut self, operation: &'static str, input: ContextInput) -> &mut Self {
        self.apply(operation, |b| {
            b.transaction.context_inputs.push(input);
            Ok(())
        })
    }

    pub fn add_tagged_data_payload(&mut self, payload: TaggedData) -> &mut Self {
        self.apply("add_tagged_data_payload", |b| {
            b.transaction.payload = Some(payload);
            Ok(())
        })
    }

    pub fn with_transaction_capabilities(&mut self, capabilities: TransactionCapabilities) -> &mut Self {
        self.apply("with_transaction_capabilities", |b| {
            b.transaction.capabilities = capabilities;
            Ok(())
        })
    }

    pub fn set_creation_slot(&mut self, slot: SlotIndex) -> &mut Self {
        self.apply("set_creation_slot", |b| {
            b.transaction.creation_slot = slot;
            Ok(())
        })
    }

    /// Adds `value` to the account's allotment, creating it if needed.
    pub fn increase_allotment(&mut self, account_id: AccountId, value: Mana) -> &mut Self {
        self.apply("increase_allotment", |b| {
            if value > 0 {
                b.transaction.allotments.increase(account_id, value)?;
            }
            Ok(())
        })
    }

    /// Mana of the recorded inputs at `target_slot`, before outputs and allotments.
    pub fn available_mana_inputs(&self, target_slot: SlotIndex) -> Result<AvailableManaResult, BuilderError> {
        Ok(self
            .api
            .mana_balance_accountant()
            .available_mana_inputs(target_slot, self.ordered_inputs(), self.rewards)?)
    }

    /// Mana not yet claimed by the draft's outputs or allotments at `target_slot`.
    pub fn available_mana_remaining(
        &self,
        target_slot: SlotIndex,
    ) -> Result<AvailableManaResult, BuilderError> {
        Ok(self.api.mana_balance_accountant().available_mana_remaining(
            target_slot,
            self.ordered_inputs(),
            self.rewards,
            &self.transaction,
        )?)
    }

    fn ordered_inputs(&self) -> impl Iterator<Item = (&OutputId, &Output)> + '_ {
        self.transaction
            .inputs
            .iter()
            .filter_map(|input| self.inputs.get_key_value(&input.output_id))
    }

    /// Allots every account its remaining bound mana, except `ignore`.
    pub fn allot_remaining_account_bound_mana(
        &mut self,
        target_slot: SlotIndex,
        ignore: &[AccountId],
    ) -> &mut Self {
        self.allot_remaining_account_bound_mana_with(target_slot, ignore, |_, _| {})
    }

    /// Like [`Self::allot_remaining_account_bound_mana`], reporting each allotment made.
    pub fn allot_remaining_account_bound_mana_with<F>(
        &mut self,
        target_slot: SlotIndex,
        ignore: &[AccountId],
        mut on_allotment: F,
    ) -> &mut Self
    where
        F: FnMut(AccountId, Mana),
    {
        self.apply("allot_remaining_account_bound_mana", |b| {
            let remaining = b.available_mana_remaining(target_slot)?;
            b.allot_account_bound(&remaining, ignore, &mut on_allotment)
        })
    }

    fn allot_account_bound(
        &mut self,
        remaining: &AvailableManaResult,
        ignore: &[AccountId],
        on_allotment: &mut dyn FnMut(AccountId, Mana),
    ) -> Result<(), BuilderError> {
        for (account_id, mana) in &remaining.account_bound_mana {
            if ignore.contains(account_id) || *mana == 0 {
                continue;
            }
            self.transaction.allotments.increase(*account_id, *mana)?;
            debug!(%account_id, mana, "allotted account-bound mana");
            on_allotment(*account_id, *mana);
        }
        Ok(())
    }

    /// Allots all remaining mana: bound mana to its accounts and unbound mana
    /// to `account_id`. Fails if `account_id` receives less than `min_required_mana`.
    pub fn allot_all_mana(
        &mut self,
        target_slot: SlotIndex,
        account_id: AccountId,
        min_required_mana: Mana,
    ) -> &mut Self {
        self.apply("allot_all_mana", |b| {
            let remaining = b.available_mana_remaining(target_slot)?;
            let routed = safe_add(remaining.unbound_mana, remaining.account_bound(&account_id))?;
            if routed < min_required_mana {
                return Err(BuilderError::NotEnoughMana {
                    required: min_required_mana,
                    available: routed,
                });
            }

            b.allot_account_bound(&remaining, &[account_id], &mut |_, _| {})?;
            if routed > 0 {
                b.transaction.allotments.increase(account_id, routed)?;
            }
            debug!(%account_id, mana = routed, "allotted all remaining mana");
            Ok(())
        })
    }

    /// Moves unbound mana, plus the bound mana of the output's own account,
    /// into the stored mana of output `output_index`. Other bound mana is allotted.
    pub fn store_remaining_mana_in_output_and_allot_remaining_account_bound_mana(
        &mut self,
        target_slot: SlotIndex,
        output_index: usize,
    ) -> &mut Self {
        self.apply("store_remaining_mana_in_output", |b| {
            b.store_remaining_mana_in_output(target_slot, output_index)
        })
    }

    fn store_remaining_mana_in_output(
        &mut self,
        target_slot: SlotIndex,
        output_index: usize,
    ) -> Result<(), BuilderError> {
        let outputs = self.transaction.outputs.len();
        let output = self
            .transaction
            .outputs
            .get(output_index)
            .ok_or(BuilderError::OutputIndexOutOfRange {
                index: output_index,
                outputs,
            })?;
        let kind = output.kind();
        let own_account = match output {
            Output::Account(account) if !account.account_id.is_empty() => Some(account.account_id),
            _ => None,
        };

        let remaining = self.available_mana_remaining(target_slot)?;
        let own_bound = own_account.map(|id| remaining.account_bound(&id)).unwrap_or(0);
        let to_store = safe_add(remaining.unbound_mana, own_bound)?;

        let stored = self
            .transaction
            .outputs
            .get_mut(output_index)
            .and_then(Output::stored_mana_mut)
            .ok_or(BuilderError::OutputCannotHoldMana {
                index: output_index,
                kind,
            })?;
        *stored = safe_add(*stored, to_store)?;
        debug!(output_index, mana = to_store, "stored remaining mana in output");

        let ignore: Vec<AccountId> = own_account.into_iter().collect();
        self.allot_account_bound(&remaining, &ignore, &mut |_, _| {})
    }

    /// Allots the block issuer what issuing this transaction costs at
    /// `reference_mana_cost`, then stores the rest in output `output_index`.
    pub fn allot_min_required_mana_and_store_remaining_mana_in_output(
        &mut self,
        target_slot: SlotIndex,
        reference_mana_cost: Mana,
        block_issuer_account_id: AccountId,
        output_index: usize,
    ) -> &mut Self {
        self.apply("allot_min_required_mana", |b| {
            let min_required = b.min_required_allotted_mana(reference_mana_cost, block_issuer_account_id)?;
            if min_required > 0 {
                b.transaction.allotments.increase(block_issuer_account_id, min_required)?;
            }
            b.store_remaining_mana_in_output(target_slot, output_index)
        })
    }

    /// Mana the issuer still needs allotted so a block carrying this
    /// transaction can burn its cost. The draft is left untouched.
    pub fn min_required_allotted_mana(
        &mut self,
        reference_mana_cost: Mana,
        block_issuer_account_id: AccountId,
    ) -> Result<Mana, BuilderError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let snapshot = self.transaction.allotments.clone();
        let result = self.estimate_block_cost(reference_mana_cost, block_issuer_account_id);
        self.transaction.allotments = snapshot;

        let cost = result?;
        let already_allotted = self.transaction.allotments.get(&block_issuer_account_id);
        let required = cost.saturating_sub(already_allotted);
        debug!(cost, already_allotted, required, "min required allotted mana");
        Ok(required)
    }

    fn estimate_block_cost(
        &mut self,
        reference_mana_cost: Mana,
        block_issuer_account_id: AccountId,
    ) -> Result<Mana, BuilderError> {
        // the issuer's allotment must be counted in the work score
        self.transaction
            .allotments
            .increase(block_issuer_account_id, PLACEHOLDER_ALLOTMENT)?;

        let signed = self.build_with(SigningMode::Empty)?;
        let block = BasicBlockBuilder::new(self.api.clone(), block_issuer_account_id)
            .payload(Payload::SignedTransaction(Box::new(signed)))
            .build();
        let work_score = block.work_score(&self.api.protocol_parameters().work_score_parameters)?;
        Ok(mana_cost(reference_mana_cost, work_score)?)
    }

    /// Finalizes and signs the transaction.
    pub fn build(&self) -> Result<SignedTransaction, BuilderError> {
        self.build_with(SigningMode::Sign)
    }

    pub fn build_with(&self, mode: SigningMode) -> Result<SignedTransaction, BuilderError> {
        if let Some(err) = &self.error {
            warn!(error = %err, "build aborted by earlier error");
            return Err(err.clone());
        }

        let mut transaction = self.transaction.clone();
        transaction.allotments.sort();
        transaction.context_inputs.sort();

        let resolved = transaction
            .inputs
            .iter()
            .map(|input| {
                let output_id = &input.output_id;
                match (self.inputs.get(output_id), self.input_owners.get(output_id)) {
                    (Some(output), Some(owner)) => Ok(ResolvedInput {
                        output_id,
                        output,
                        owner,
                    }),
                    _ => Err(BuilderError::UnknownInput(*output_id)),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        transaction.inputs_commitment = inputs_commitment(resolved.iter().map(|r| r.output))?;

        debug!(
            inputs = resolved.len(),
            outputs = transaction.outputs.len(),
            allotments = transaction.allotments.len(),
            mode = ?mode,
            "building transaction"
        );
        let unlocks = UnlockResolver::new(&self.signer, mode).resolve(&transaction, &resolved)?;
        Ok(SignedTransaction {
            transaction,
            unlocks,
        })
    }
}
