//! # Shared Types Crate
//!
//! The ledger model shared by the mana engine and the transaction builder:
//! identifiers, addresses, outputs, unlock conditions, transactions, unlocks,
//! basic blocks, protocol parameters, the slot/epoch time provider and the
//! work score.
//!
//! ## Design Principles
//!
//! - **Closed catalogs**: outputs, addresses, unlocks, context inputs and
//!   chain ids are enums. Adding a kind is a compile-time change everywhere
//!   it matters.
//! - **Checked arithmetic**: amounts go through [`safemath`]. Nothing wraps
//!   or saturates silently.
//! - **One byte representation**: hashes, signing messages and encoded sizes
//!   all use the `bincode` encoding of these types.

pub mod address;
pub mod block;
pub mod errors;
pub mod identifiers;
pub mod output;
pub mod parameters;
pub mod safemath;
pub mod time;
pub mod transaction;
pub mod unlock;
pub mod unlock_condition;
pub mod work_score;

pub use address::*;
pub use block::{BasicBlock, BlockHeader, BlockId, Payload};
pub use errors::*;
pub use identifiers::*;
pub use output::*;
pub use parameters::{ManaDerivation, ManaParameters, ProtocolParameters};
pub use time::TimeProvider;
pub use transaction::*;
pub use unlock::*;
pub use unlock_condition::*;
pub use work_score::{mana_cost, WorkScoreParameters};
