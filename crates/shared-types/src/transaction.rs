//! # Transactions
//!
//! The transaction body, its inputs, context inputs, mana allotments and the
//! signed envelope produced by the builder.
//!
//! ## Canonical Bytes
//!
//! The wire codec lives outside this workspace. Hashes, signing messages and
//! work-score sizes are derived from the `bincode` encoding of these types so
//! that every component agrees on one byte representation.

use serde::{Deserialize, Serialize};
use shared_crypto::{blake3_hash, Blake3Hasher};

use crate::errors::{ArithmeticError, EncodingError};
use crate::identifiers::{AccountId, CommitmentId, Mana, OutputId, SlotIndex, TransactionId};
use crate::output::Output;
use crate::safemath::safe_add;
use crate::unlock::Unlock;

/// Reference to an unspent output consumed by a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UtxoInput {
    pub output_id: OutputId,
}

/// Points at the slot commitment the transaction is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitmentInput {
    pub commitment_id: CommitmentId,
}

/// Makes an account's block issuance credit available to the transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockIssuanceCreditInput {
    pub account_id: AccountId,
}

/// Claims rewards for the input at `index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RewardInput {
    pub index: u16,
}

/// Inputs that are read but not consumed. Sorted by kind, then by payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContextInput {
    Commitment(CommitmentInput),
    BlockIssuanceCredit(BlockIssuanceCreditInput),
    Reward(RewardInput),
}

/// Mana credited to an account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Allotment {
    pub account_id: AccountId,
    pub mana: Mana,
}

/// Allotment list with at most one entry per account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allotments(Vec<Allotment>);

impl Allotments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mana allotted to `account_id`, zero if none.
    pub fn get(&self, account_id: &AccountId) -> Mana {
        self.0
            .iter()
            .find(|a| &a.account_id == account_id)
            .map(|a| a.mana)
            .unwrap_or(0)
    }

    /// Adds `mana` to the account's allotment, appending one if absent.
    pub fn increase(&mut self, account_id: AccountId, mana: Mana) -> Result<(), ArithmeticError> {
        match self.0.iter_mut().find(|a| a.account_id == account_id) {
            Some(existing) => existing.mana = safe_add(existing.mana, mana)?,
            None => self.0.push(Allotment { account_id, mana }),
        }
        Ok(())
    }

    /// Sorts lexically by account id.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Allotment> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Allotment] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Allotments {
    type Item = &'a Allotment;
    type IntoIter = std::slice::Iter<'a, Allotment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Capability bits a transaction declares.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionCapabilities(pub u8);

impl TransactionCapabilities {
    pub const CAN_BURN_NATIVE_TOKENS: u8 = 1 << 0;
    pub const CAN_BURN_MANA: u8 = 1 << 1;
    pub const CAN_DESTROY_ACCOUNT_OUTPUTS: u8 = 1 << 2;
    pub const CAN_DESTROY_ANCHOR_OUTPUTS: u8 = 1 << 3;
    pub const CAN_DESTROY_FOUNDRY_OUTPUTS: u8 = 1 << 4;
    pub const CAN_DESTROY_NFT_OUTPUTS: u8 = 1 << 5;

    pub fn has(&self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

/// Arbitrary tagged data carried by a transaction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedData {
    pub tag: Vec<u8>,
    pub data: Vec<u8>,
}

/// The unsigned transaction body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub network_id: u64,
    pub creation_slot: SlotIndex,
    pub context_inputs: Vec<ContextInput>,
    pub inputs: Vec<UtxoInput>,
    /// Commitment over the consumed outputs, in input order.
    pub inputs_commitment: [u8; 32],
    pub allotments: Allotments,
    pub capabilities: TransactionCapabilities,
    pub payload: Option<TaggedData>,
    pub outputs: Vec<Output>,
}

impl Transaction {
    /// Canonical encoding of the body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(bincode::serialize(self)?)
    }

    /// The 32-byte message every signature unlock signs.
    pub fn signing_message(&self) -> Result<[u8; 32], EncodingError> {
        Ok(blake3_hash(&self.to_bytes()?))
    }

    pub fn id(&self) -> Result<TransactionId, EncodingError> {
        Ok(TransactionId::new(self.signing_message()?, self.creation_slot))
    }

    /// Id of the output created at `index`.
    pub fn output_id(&self, index: u16) -> Result<OutputId, EncodingError> {
        Ok(OutputId::new(self.id()?, index))
    }
}

/// Hash over the hashes of the consumed outputs, in the given order.
pub fn inputs_commitment<'a, I>(outputs: I) -> Result<[u8; 32], EncodingError>
where
    I: IntoIterator<Item = &'a Output>,
{
    let mut hasher = Blake3Hasher::new();
    for output in outputs {
        hasher.update(&blake3_hash(&bincode::serialize(output)?));
    }
    Ok(hasher.finalize())
}

/// A transaction together with one unlock per input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub unlocks: Vec<Unlock>,
}

impl SignedTransaction {
    pub fn id(&self) -> Result<TransactionId, EncodingError> {
        self.transaction.id()
    }

    pub fn signature_unlock_count(&self) -> usize {
        self.unlocks.iter().filter(|u| u.is_signature()).count()
    }

    /// Encoded length in bytes.
    pub fn size(&self) -> Result<u64, EncodingError> {
        Ok(bincode::serialized_size(self)?)
    }
}
