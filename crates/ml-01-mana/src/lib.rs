//! # Mana Engine
//!
//! Deterministic mana decay, mana generation and the mana balance of a
//! transaction draft.
//!
//! ## Purpose
//!
//! Mana is generated by holding base tokens and decays while it is stored.
//! Every node has to arrive at the same value for the same output, so all
//! computations use 32-bit fixed-point arithmetic that wraps exactly like
//! the reference implementation and fails loudly instead of saturating.
//!
//! ## Components
//!
//! | Component | Responsibility |
//! |-----------|----------------|
//! | `ManaDecayProvider` | Decay across epochs, generation across slots |
//! | `ManaBalanceAccountant` | Unbound and account-bound mana of a draft |
//! | `Api` | Protocol parameters plus the services derived from them |
//!
//! ## Potential Mana
//!
//! ```text
//! creation epoch        full epochs             target epoch
//! [ ... | rest ] [ e+1 ] [ e+2 ] ... [ e+d-1 ] [ elapsed | ... ]
//!         decay d   decay d-1  ...    decay 1      no decay
//! ```
//!
//! ## Errors
//!
//! | Error | Cause |
//! |-------|-------|
//! | `WrongEpochIndex` | Creation epoch after target epoch |
//! | `WrongSlotIndex` | Creation slot after target slot |
//! | `Arithmetic` | Checked addition or subtraction failed |
//! | `Parameters` | Parameters the fixed-point math cannot use |

pub mod api;
pub mod domain;

pub use api::Api;
pub use domain::{
    AvailableManaResult, ManaBalanceAccountant, ManaDecayProvider, ManaError,
};
