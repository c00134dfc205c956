//! # Basic Block Builder
//!
//! Wraps a payload into a basic block and prices it.
//!
//! # Example
//!
//! ```ignore
//! let block = BasicBlockBuilder::new(api, issuer_id)
//!     .strong_parents(parents)
//!     .payload(Payload::SignedTransaction(Box::new(signed)))
//!     .calculate_and_set_max_burned_mana(reference_mana_cost)?
//!     .build();
//! ```

use std::sync::Arc;

use ml_01_mana::Api;
use shared_types::{
    mana_cost, AccountId, BasicBlock, BlockHeader, BlockId, CommitmentId, Mana, Payload, SlotIndex,
};

use super::errors::BuilderError;

pub struct BasicBlockBuilder {
    api: Arc<Api>,
    issuer_id: AccountId,
    issuing_time: i64,
    slot_commitment_id: CommitmentId,
    latest_finalized_slot: SlotIndex,
    strong_parents: Vec<BlockId>,
    weak_parents: Vec<BlockId>,
    shallow_like_parents: Vec<BlockId>,
    payload: Option<Payload>,
    max_burned_mana: Mana,
}

impl BasicBlockBuilder {
    pub fn new(api: Arc<Api>, issuer_id: AccountId) -> Self {
        Self {
            api,
            issuer_id,
            issuing_time: 0,
            slot_commitment_id: CommitmentId::default(),
            latest_finalized_slot: 0,
            strong_parents: Vec::new(),
            weak_parents: Vec::new(),
            shallow_like_parents: Vec::new(),
            payload: None,
            max_burned_mana: 0,
        }
    }

    pub fn issuing_time(mut self, unix_seconds: i64) -> Self {
        self.issuing_time = unix_seconds;
        self
    }

    pub fn slot_commitment_id(mut self, commitment_id: CommitmentId) -> Self {
        self.slot_commitment_id = commitment_id;
        self
    }

    pub fn latest_finalized_slot(mut self, slot: SlotIndex) -> Self {
        self.latest_finalized_slot = slot;
        self
    }

    pub fn strong_parents(mut self, parents: Vec<BlockId>) -> Self {
        self.strong_parents = parents;
        self
    }

    pub fn weak_parents(mut self, parents: Vec<BlockId>) -> Self {
        self.weak_parents = parents;
        self
    }

    pub fn shallow_like_parents(mut self, parents: Vec<BlockId>) -> Self {
        self.shallow_like_parents = parents;
        self
    }

    pub fn payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn max_burned_mana(mut self, mana: Mana) -> Self {
        self.max_burned_mana = mana;
        self
    }

    /// Sets the burn limit to exactly what the block costs at `reference_mana_cost`.
    pub fn calculate_and_set_max_burned_mana(
        mut self,
        reference_mana_cost: Mana,
    ) -> Result<Self, BuilderError> {
        let work_score = self
            .block()
            .work_score(&self.api.protocol_parameters().work_score_parameters)?;
        self.max_burned_mana = mana_cost(reference_mana_cost, work_score)?;
        Ok(self)
    }

    pub fn build(self) -> BasicBlock {
        self.block()
    }

    fn block(&self) -> BasicBlock {
        let params = self.api.protocol_parameters();
        BasicBlock {
            header: BlockHeader {
                protocol_version: params.version,
                network_id: params.network_id(),
                issuing_time: self.issuing_time,
                slot_commitment_id: self.slot_commitment_id,
                latest_finalized_slot: self.latest_finalized_slot,
                issuer_id: self.issuer_id,
            },
            strong_parents: self.strong_parents.clone(),
            weak_parents: self.weak_parents.clone(),
            shallow_like_parents: self.shallow_like_parents.clone(),
            payload: self.payload.clone(),
            max_burned_mana: self.max_burned_mana,
        }
    }
}
