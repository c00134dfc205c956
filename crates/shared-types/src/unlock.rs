//! Signatures and the unlocks that authorize transaction inputs.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Ed25519 signature together with the signing public key.
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519Signature {
    pub public_key: [u8; 32],
    #[serde_as(as = "Bytes")]
    pub signature: [u8; 64],
}

impl Ed25519Signature {
    /// Placeholder with the right shape and an all-zero signature.
    pub fn empty(public_key: [u8; 32]) -> Self {
        Self {
            public_key,
            signature: [0u8; 64],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.signature == [0u8; 64]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signature {
    Ed25519(Ed25519Signature),
}

/// Proof attached to one input, index-aligned with the transaction inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unlock {
    /// A fresh signature.
    Signature(Signature),
    /// Reuses the signature unlock at `reference`.
    Reference { reference: u16 },
    /// The account chain unlocked at `reference` owns this input.
    Account { reference: u16 },
    /// The anchor chain unlocked at `reference` owns this input.
    Anchor { reference: u16 },
    /// The NFT chain unlocked at `reference` owns this input.
    Nft { reference: u16 },
}

impl Unlock {
    pub fn is_signature(&self) -> bool {
        matches!(self, Self::Signature(_))
    }

    /// Index this unlock points back to, for every non-signature unlock.
    pub fn reference(&self) -> Option<u16> {
        match self {
            Self::Signature(_) => None,
            Self::Reference { reference }
            | Self::Account { reference }
            | Self::Anchor { reference }
            | Self::Nft { reference } => Some(*reference),
        }
    }
}
