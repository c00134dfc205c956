//! # Work Score
//!
//! The work score prices the processing cost of a block. The mana a block
//! issuer must burn is `reference_mana_cost * work_score`.

use serde::{Deserialize, Serialize};

use crate::errors::{ArithmeticError, WorkScoreError};
use crate::identifiers::{Mana, WorkScore};
use crate::safemath::{safe_add, safe_mul};
use crate::transaction::SignedTransaction;

/// Per-item weights used to score payloads and blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkScoreParameters {
    /// Charged per encoded byte.
    pub data_byte: WorkScore,
    /// Flat charge for any block.
    pub block: WorkScore,
    pub input: WorkScore,
    pub context_input: WorkScore,
    pub output: WorkScore,
    pub allotment: WorkScore,
    /// Charged per signature unlock. References are free.
    pub signature_ed25519: WorkScore,
}

impl Default for WorkScoreParameters {
    fn default() -> Self {
        Self {
            data_byte: 1,
            block: 100,
            input: 10,
            context_input: 20,
            output: 20,
            allotment: 1_000,
            signature_ed25519: 1_000,
        }
    }
}

impl WorkScoreParameters {
    /// Score of a signed transaction payload.
    pub fn signed_transaction(&self, signed: &SignedTransaction) -> Result<WorkScore, WorkScoreError> {
        let tx = &signed.transaction;
        let parts = [
            (signed.size()?, self.data_byte),
            (tx.inputs.len() as u64, self.input),
            (tx.context_inputs.len() as u64, self.context_input),
            (tx.outputs.len() as u64, self.output),
            (tx.allotments.len() as u64, self.allotment),
            (signed.signature_unlock_count() as u64, self.signature_ed25519),
        ];

        let mut score = 0u64;
        for (count, weight) in parts {
            score = safe_add(score, safe_mul(count, u64::from(weight))?)?;
        }
        to_work_score(score)
    }

    /// Flat block charge plus the payload's score.
    pub fn block(&self, payload_score: WorkScore) -> Result<WorkScore, WorkScoreError> {
        to_work_score(safe_add(u64::from(self.block), u64::from(payload_score))?)
    }
}

/// Mana burned by a block with `work_score` at `reference_mana_cost`.
pub fn mana_cost(reference_mana_cost: Mana, work_score: WorkScore) -> Result<Mana, ArithmeticError> {
    safe_mul(reference_mana_cost, u64::from(work_score))
}

pub(crate) fn to_work_score(value: u64) -> Result<WorkScore, WorkScoreError> {
    WorkScore::try_from(value).map_err(|_| {
        WorkScoreError::Arithmetic(ArithmeticError::AdditionOverflow {
            lhs: value,
            rhs: 0,
        })
    })
}
