//! # Blocks
//!
//! The minimal basic block that carries a payload into the ledger. Only what
//! the mana cost of a block depends on is modelled here.

use serde::{Deserialize, Serialize};

use crate::errors::{EncodingError, WorkScoreError};
use crate::identifiers::{AccountId, CommitmentId, Mana, SlotIndex, WorkScore};
use crate::safemath::safe_mul;
use crate::transaction::{SignedTransaction, TaggedData};
use crate::work_score::{to_work_score, WorkScoreParameters};

pub type BlockId = [u8; 32];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub protocol_version: u8,
    pub network_id: u64,
    pub issuing_time: i64,
    pub slot_commitment_id: CommitmentId,
    pub latest_finalized_slot: SlotIndex,
    pub issuer_id: AccountId,
}

/// What a basic block can carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    SignedTransaction(Box<SignedTransaction>),
    TaggedData(TaggedData),
}

impl Payload {
    pub fn work_score(&self, params: &WorkScoreParameters) -> Result<WorkScore, WorkScoreError> {
        match self {
            Self::SignedTransaction(signed) => params.signed_transaction(signed),
            Self::TaggedData(data) => {
                let size = bincode::serialized_size(data).map_err(EncodingError::from)?;
                to_work_score(safe_mul(size, u64::from(params.data_byte))?)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub header: BlockHeader,
    pub strong_parents: Vec<BlockId>,
    pub weak_parents: Vec<BlockId>,
    pub shallow_like_parents: Vec<BlockId>,
    pub payload: Option<Payload>,
    /// Upper bound on the mana the issuer burns for this block.
    pub max_burned_mana: Mana,
}

impl BasicBlock {
    /// Flat block charge plus the payload's score.
    pub fn work_score(&self, params: &WorkScoreParameters) -> Result<WorkScore, WorkScoreError> {
        let payload_score = match &self.payload {
            Some(payload) => payload.work_score(params)?,
            None => 0,
        };
        params.block(payload_score)
    }
}
