//! # Outputs
//!
//! The closed catalog of output kinds. Every output holds base tokens and an
//! unlock condition set; all but foundries and delegations can also hold
//! stored mana. Chain outputs carry a [`ChainId`] that stays stable across
//! state transitions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::{AccountAddress, Address};
use crate::identifiers::{
    AccountId, AnchorId, BaseToken, ChainId, DelegationId, EpochIndex, FoundryId, Mana, NftId,
};
use crate::unlock_condition::UnlockConditionSet;

/// Plain value output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicOutput {
    pub amount: BaseToken,
    pub mana: Mana,
    pub unlock_conditions: UnlockConditionSet,
}

/// Account chain output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOutput {
    pub amount: BaseToken,
    pub mana: Mana,
    /// Empty when the account is being created.
    pub account_id: AccountId,
    pub foundry_counter: u32,
    pub unlock_conditions: UnlockConditionSet,
}

/// Anchor chain output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorOutput {
    pub amount: BaseToken,
    pub mana: Mana,
    pub anchor_id: AnchorId,
    pub state_index: u32,
    pub unlock_conditions: UnlockConditionSet,
}

/// Supply bookkeeping of a foundry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleTokenScheme {
    pub minted_tokens: u64,
    pub melted_tokens: u64,
    pub maximum_supply: u64,
}

/// Foundry output, controlled by an account through its immutable account address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundryOutput {
    pub amount: BaseToken,
    pub serial_number: u32,
    pub token_scheme: SimpleTokenScheme,
    pub unlock_conditions: UnlockConditionSet,
}

impl FoundryOutput {
    pub fn foundry_id(&self) -> FoundryId {
        let account_id = match self.unlock_conditions.immutable_account_address.as_ref() {
            Some(Address::Account(AccountAddress(id))) => *id,
            _ => AccountId::EMPTY,
        };
        FoundryId {
            account_id,
            serial_number: self.serial_number,
            token_scheme_kind: 0,
        }
    }
}

/// NFT chain output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftOutput {
    pub amount: BaseToken,
    pub mana: Mana,
    pub nft_id: NftId,
    pub unlock_conditions: UnlockConditionSet,
}

/// Stake delegated to a validator account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationOutput {
    pub amount: BaseToken,
    pub delegated_amount: BaseToken,
    pub delegation_id: DelegationId,
    pub validator_address: AccountAddress,
    pub start_epoch: EpochIndex,
    pub end_epoch: EpochIndex,
    pub unlock_conditions: UnlockConditionSet,
}

/// Output kind discriminant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputKind {
    Basic,
    Account,
    Anchor,
    Foundry,
    Nft,
    Delegation,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Basic => "basic",
            Self::Account => "account",
            Self::Anchor => "anchor",
            Self::Foundry => "foundry",
            Self::Nft => "nft",
            Self::Delegation => "delegation",
        };
        f.write_str(name)
    }
}

/// Any output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    Basic(BasicOutput),
    Account(AccountOutput),
    Anchor(AnchorOutput),
    Foundry(FoundryOutput),
    Nft(NftOutput),
    Delegation(DelegationOutput),
}

impl Output {
    /// Basic output locked to `address`.
    pub fn basic(amount: BaseToken, mana: Mana, address: Address) -> Self {
        Self::Basic(BasicOutput {
            amount,
            mana,
            unlock_conditions: UnlockConditionSet::with_address(address),
        })
    }

    /// Account output locked to `address`.
    pub fn account(amount: BaseToken, mana: Mana, account_id: AccountId, address: Address) -> Self {
        Self::Account(AccountOutput {
            amount,
            mana,
            account_id,
            foundry_counter: 0,
            unlock_conditions: UnlockConditionSet::with_address(address),
        })
    }

    /// NFT output locked to `address`.
    pub fn nft(amount: BaseToken, mana: Mana, nft_id: NftId, address: Address) -> Self {
        Self::Nft(NftOutput {
            amount,
            mana,
            nft_id,
            unlock_conditions: UnlockConditionSet::with_address(address),
        })
    }

    pub fn kind(&self) -> OutputKind {
        match self {
            Self::Basic(_) => OutputKind::Basic,
            Self::Account(_) => OutputKind::Account,
            Self::Anchor(_) => OutputKind::Anchor,
            Self::Foundry(_) => OutputKind::Foundry,
            Self::Nft(_) => OutputKind::Nft,
            Self::Delegation(_) => OutputKind::Delegation,
        }
    }

    pub fn base_token_amount(&self) -> BaseToken {
        match self {
            Self::Basic(o) => o.amount,
            Self::Account(o) => o.amount,
            Self::Anchor(o) => o.amount,
            Self::Foundry(o) => o.amount,
            Self::Nft(o) => o.amount,
            Self::Delegation(o) => o.amount,
        }
    }

    /// Mana stored on the output. Foundries and delegations hold none.
    pub fn stored_mana(&self) -> Mana {
        match self {
            Self::Basic(o) => o.mana,
            Self::Account(o) => o.mana,
            Self::Anchor(o) => o.mana,
            Self::Nft(o) => o.mana,
            Self::Foundry(_) | Self::Delegation(_) => 0,
        }
    }

    /// Mutable access to the stored mana field, if the kind has one.
    pub fn stored_mana_mut(&mut self) -> Option<&mut Mana> {
        match self {
            Self::Basic(o) => Some(&mut o.mana),
            Self::Account(o) => Some(&mut o.mana),
            Self::Anchor(o) => Some(&mut o.mana),
            Self::Nft(o) => Some(&mut o.mana),
            Self::Foundry(_) | Self::Delegation(_) => None,
        }
    }

    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Basic(_) => None,
            Self::Account(o) => Some(ChainId::Account(o.account_id)),
            Self::Anchor(o) => Some(ChainId::Anchor(o.anchor_id)),
            Self::Foundry(o) => Some(ChainId::Foundry(o.foundry_id())),
            Self::Nft(o) => Some(ChainId::Nft(o.nft_id)),
            Self::Delegation(o) => Some(ChainId::Delegation(o.delegation_id)),
        }
    }

    pub fn unlock_conditions(&self) -> &UnlockConditionSet {
        match self {
            Self::Basic(o) => &o.unlock_conditions,
            Self::Account(o) => &o.unlock_conditions,
            Self::Anchor(o) => &o.unlock_conditions,
            Self::Foundry(o) => &o.unlock_conditions,
            Self::Nft(o) => &o.unlock_conditions,
            Self::Delegation(o) => &o.unlock_conditions,
        }
    }

    pub fn unlock_conditions_mut(&mut self) -> &mut UnlockConditionSet {
        match self {
            Self::Basic(o) => &mut o.unlock_conditions,
            Self::Account(o) => &mut o.unlock_conditions,
            Self::Anchor(o) => &mut o.unlock_conditions,
            Self::Foundry(o) => &mut o.unlock_conditions,
            Self::Nft(o) => &mut o.unlock_conditions,
            Self::Delegation(o) => &mut o.unlock_conditions,
        }
    }
}
