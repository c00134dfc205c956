//! # Identifiers
//!
//! Transaction, output and chain identifiers.
//!
//! Chain identifiers of freshly created chain outputs are empty (all zero) and
//! are derived from the id of the output that created them once that output is
//! consumed.

use serde::{Deserialize, Serialize};
use shared_crypto::blake3_hash;
use std::fmt;

use crate::address::{AccountAddress, Address, AnchorAddress, NftAddress};

/// Slot index (nested inside an epoch).
pub type SlotIndex = u32;

/// Epoch index.
pub type EpochIndex = u32;

/// Base token amount.
pub type BaseToken = u64;

/// Mana amount (fixed-point, never negative).
pub type Mana = u64;

/// Work score unit.
pub type WorkScore = u32;

/// Length of a serialized [`OutputId`].
pub const OUTPUT_ID_LENGTH: usize = 38;

fn fmt_hex(bytes: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("0x")?;
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// Identifier of a transaction: its content hash plus the creation slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TransactionId {
    /// BLAKE3 hash of the transaction.
    pub hash: [u8; 32],
    /// Creation slot of the transaction.
    pub slot: SlotIndex,
}

impl TransactionId {
    /// Creates a transaction id.
    pub fn new(hash: [u8; 32], slot: SlotIndex) -> Self {
        Self { hash, slot }
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.hash, f)?;
        write!(f, "@{}", self.slot)
    }
}

/// Identifier of an output: the creating transaction and the output index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OutputId {
    /// Transaction that created the output.
    pub transaction_id: TransactionId,
    /// Position of the output in that transaction.
    pub index: u16,
}

impl OutputId {
    /// Creates an output id.
    pub fn new(transaction_id: TransactionId, index: u16) -> Self {
        Self {
            transaction_id,
            index,
        }
    }

    /// Slot in which the output was created.
    pub fn creation_slot(&self) -> SlotIndex {
        self.transaction_id.slot
    }

    /// Canonical byte form: hash || slot (LE) || index (LE).
    pub fn to_bytes(&self) -> [u8; OUTPUT_ID_LENGTH] {
        let mut bytes = [0u8; OUTPUT_ID_LENGTH];
        bytes[..32].copy_from_slice(&self.transaction_id.hash);
        bytes[32..36].copy_from_slice(&self.transaction_id.slot.to_le_bytes());
        bytes[36..].copy_from_slice(&self.index.to_le_bytes());
        bytes
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.index)
    }
}

macro_rules! chain_id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            /// The all-zero id carried by freshly created outputs.
            pub const EMPTY: Self = Self([0u8; 32]);

            /// Returns true for the all-zero id.
            pub fn is_empty(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Derives the id from the output that created the chain.
            pub fn from_output_id(output_id: &OutputId) -> Self {
                Self(blake3_hash(&output_id.to_bytes()))
            }

            /// Raw bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt_hex(&self.0, f)
            }
        }
    };
}

chain_id_type!(
    /// Identifier of an account chain.
    AccountId
);
chain_id_type!(
    /// Identifier of an anchor chain.
    AnchorId
);
chain_id_type!(
    /// Identifier of an NFT chain.
    NftId
);
chain_id_type!(
    /// Identifier of a delegation chain.
    DelegationId
);

/// Identifier of a foundry: controlling account, serial number and scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FoundryId {
    /// Account controlling the foundry.
    pub account_id: AccountId,
    /// Serial number, unique per account.
    pub serial_number: u32,
    /// Token scheme discriminant.
    pub token_scheme_kind: u8,
}

/// Identifier of a slot commitment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommitmentId {
    /// Commitment hash.
    pub hash: [u8; 32],
    /// Committed slot.
    pub slot: SlotIndex,
}

/// Stable identity of a signing key, used to deduplicate signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignerUid(pub [u8; 32]);

impl fmt::Display for SignerUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.0, f)
    }
}

/// Identifier of any chain output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChainId {
    Account(AccountId),
    Anchor(AnchorId),
    Nft(NftId),
    Foundry(FoundryId),
    Delegation(DelegationId),
}

impl ChainId {
    /// Only account, anchor and NFT chains can own other outputs.
    pub fn is_addressable(&self) -> bool {
        matches!(self, Self::Account(_) | Self::Anchor(_) | Self::Nft(_))
    }

    /// True when the chain has not been assigned an id yet.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Account(id) => id.is_empty(),
            Self::Anchor(id) => id.is_empty(),
            Self::Nft(id) => id.is_empty(),
            Self::Delegation(id) => id.is_empty(),
            Self::Foundry(_) => false,
        }
    }

    /// Replaces an empty id with the one derived from `output_id`.
    pub fn or_from_output_id(self, output_id: &OutputId) -> Self {
        if !self.is_empty() {
            return self;
        }
        match self {
            Self::Account(_) => Self::Account(AccountId::from_output_id(output_id)),
            Self::Anchor(_) => Self::Anchor(AnchorId::from_output_id(output_id)),
            Self::Nft(_) => Self::Nft(NftId::from_output_id(output_id)),
            Self::Delegation(_) => Self::Delegation(DelegationId::from_output_id(output_id)),
            Self::Foundry(_) => self,
        }
    }

    /// The address that delegates to this chain, if it is addressable.
    pub fn to_address(&self) -> Option<Address> {
        match self {
            Self::Account(id) => Some(Address::Account(AccountAddress(*id))),
            Self::Anchor(id) => Some(Address::Anchor(AnchorAddress(*id))),
            Self::Nft(id) => Some(Address::Nft(NftAddress(*id))),
            Self::Foundry(_) | Self::Delegation(_) => None,
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account(id) => write!(f, "account {}", id),
            Self::Anchor(id) => write!(f, "anchor {}", id),
            Self::Nft(id) => write!(f, "nft {}", id),
            Self::Foundry(id) => write!(f, "foundry {}/{}", id.account_id, id.serial_number),
            Self::Delegation(id) => write!(f, "delegation {}", id),
        }
    }
}
