//! # Addresses
//!
//! The closed set of address kinds an output can be locked to.
//!
//! | Kind | Unlocked by |
//! |------|-------------|
//! | `Ed25519` | Signature of the matching key |
//! | `ImplicitAccountCreation` | Signature of the wrapped Ed25519 key |
//! | `Account` / `Anchor` / `Nft` | Unlocking the chain output itself |
//! | `Multi` | Weighted set of addresses (not resolvable by the builder) |
//! | `Restricted` | Whatever the wrapped address requires |

use serde::{Deserialize, Serialize};
use shared_crypto::blake3_hash;
use std::fmt;

use crate::identifiers::{AccountId, AnchorId, ChainId, NftId};

/// Address backed by an Ed25519 public key hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ed25519Address(pub [u8; 32]);

impl Ed25519Address {
    /// Derives the address of a public key.
    pub fn from_public_key(public_key: &[u8; 32]) -> Self {
        Self(blake3_hash(public_key))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Address of an account chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountAddress(pub AccountId);

/// Address of an anchor chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnchorAddress(pub AnchorId);

/// Address of an NFT chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NftAddress(pub NftId);

/// Ed25519-backed address that may only receive an implicit account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImplicitAccountCreationAddress(pub Ed25519Address);

/// One weighted member of a [`MultiAddress`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeightedAddress {
    pub address: Address,
    pub weight: u8,
}

/// Threshold address over several weighted addresses.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MultiAddress {
    pub addresses: Vec<WeightedAddress>,
    pub threshold: u16,
}

/// Capability bits a [`RestrictedAddress`] grants to the outputs it receives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AddressCapabilities(pub u16);

impl AddressCapabilities {
    pub const CAN_RECEIVE_NATIVE_TOKENS: u16 = 1 << 0;
    pub const CAN_RECEIVE_MANA: u16 = 1 << 1;
    pub const CAN_RECEIVE_OUTPUTS_WITH_TIMELOCK: u16 = 1 << 2;
    pub const CAN_RECEIVE_OUTPUTS_WITH_EXPIRATION: u16 = 1 << 3;
    pub const CAN_RECEIVE_OUTPUTS_WITH_STORAGE_DEPOSIT_RETURN: u16 = 1 << 4;
    pub const CAN_RECEIVE_ACCOUNT_OUTPUTS: u16 = 1 << 5;
    pub const CAN_RECEIVE_ANCHOR_OUTPUTS: u16 = 1 << 6;
    pub const CAN_RECEIVE_NFT_OUTPUTS: u16 = 1 << 7;
    pub const CAN_RECEIVE_DELEGATION_OUTPUTS: u16 = 1 << 8;

    /// Every capability set.
    pub fn all() -> Self {
        Self((1 << 9) - 1)
    }

    /// True if `flag` is set.
    pub fn has(&self, flag: u16) -> bool {
        self.0 & flag == flag
    }
}

/// An address wrapped with receive capabilities.
///
/// Capabilities restrict what the address may receive; they do not change who
/// can unlock it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RestrictedAddress {
    pub address: Box<Address>,
    pub capabilities: AddressCapabilities,
}

/// Address kind discriminant, used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    Ed25519,
    Account,
    Nft,
    Anchor,
    ImplicitAccountCreation,
    Multi,
    Restricted,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ed25519 => "ed25519",
            Self::Account => "account",
            Self::Nft => "nft",
            Self::Anchor => "anchor",
            Self::ImplicitAccountCreation => "implicit-account-creation",
            Self::Multi => "multi",
            Self::Restricted => "restricted",
        };
        f.write_str(name)
    }
}

/// Any address an output can be locked to.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Address {
    Ed25519(Ed25519Address),
    Account(AccountAddress),
    Nft(NftAddress),
    Anchor(AnchorAddress),
    ImplicitAccountCreation(ImplicitAccountCreationAddress),
    Multi(MultiAddress),
    Restricted(RestrictedAddress),
}

impl Address {
    /// Wraps `self` into a restricted address.
    pub fn restricted(self, capabilities: AddressCapabilities) -> Self {
        Self::Restricted(RestrictedAddress {
            address: Box::new(self),
            capabilities,
        })
    }

    pub fn kind(&self) -> AddressKind {
        match self {
            Self::Ed25519(_) => AddressKind::Ed25519,
            Self::Account(_) => AddressKind::Account,
            Self::Nft(_) => AddressKind::Nft,
            Self::Anchor(_) => AddressKind::Anchor,
            Self::ImplicitAccountCreation(_) => AddressKind::ImplicitAccountCreation,
            Self::Multi(_) => AddressKind::Multi,
            Self::Restricted(_) => AddressKind::Restricted,
        }
    }

    /// The address that actually has to be unlocked.
    pub fn unwrap_restricted(&self) -> &Address {
        match self {
            Self::Restricted(restricted) => &restricted.address,
            other => other,
        }
    }

    /// The chain this address delegates to, for account, anchor and NFT addresses.
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Account(a) => Some(ChainId::Account(a.0)),
            Self::Anchor(a) => Some(ChainId::Anchor(a.0)),
            Self::Nft(a) => Some(ChainId::Nft(a.0)),
            _ => None,
        }
    }

    /// True for addresses unlocked by a single signature.
    pub fn is_directly_unlockable(&self) -> bool {
        matches!(self, Self::Ed25519(_) | Self::ImplicitAccountCreation(_))
    }

    /// The Ed25519 key hash behind a directly unlockable address.
    pub fn ed25519(&self) -> Option<&Ed25519Address> {
        match self.unwrap_restricted() {
            Self::Ed25519(addr) => Some(addr),
            Self::ImplicitAccountCreation(addr) => Some(&addr.0),
            _ => None,
        }
    }
}

impl From<Ed25519Address> for Address {
    fn from(addr: Ed25519Address) -> Self {
        Self::Ed25519(addr)
    }
}

impl From<AccountAddress> for Address {
    fn from(addr: AccountAddress) -> Self {
        Self::Account(addr)
    }
}

impl From<NftAddress> for Address {
    fn from(addr: NftAddress) -> Self {
        Self::Nft(addr)
    }
}

impl From<AnchorAddress> for Address {
    fn from(addr: AnchorAddress) -> Self {
        Self::Anchor(addr)
    }
}
