//! # Transaction Builder
//!
//! Assembles transactions, balances their mana and resolves the unlocks that
//! authorize their inputs.
//!
//! ## Purpose
//!
//! A caller adds inputs (each with the address that must authorize it),
//! outputs, context inputs and allotments, then applies one of the mana
//! policies to distribute what the inputs make available. `build()` sorts a
//! copy of the draft, commits to the inputs and produces a signed
//! transaction with exactly one unlock per input.
//!
//! ## Unlocks
//!
//! | Owner | Unlock |
//! |-------|--------|
//! | Ed25519 / implicit account, first use of the key | `Signature` |
//! | Ed25519 / implicit account, key already used | `Reference` |
//! | Account / anchor / NFT address | `Account` / `Anchor` / `Nft` reference |
//! | Restricted address | resolved as the wrapped address |
//! | Multi address | rejected |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/in_memory_signer.rs - Ed25519 keys held in memory     │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs - AddressSigner trait                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/builder.rs         - TransactionBuilder                 │
//! │  domain/unlock_resolver.rs - UnlockResolver                     │
//! │  domain/block_builder.rs   - BasicBlockBuilder                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//!
//! A builder is owned and mutated by one caller. The shared [`ml_01_mana::Api`]
//! is immutable and handed around in an `Arc`.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::InMemoryAddressSigner;
pub use domain::{
    BasicBlockBuilder, BuilderError, InputSpec, ResolvedInput, SigningMode, TransactionBuilder,
    UnlockResolver,
};
pub use ports::{AddressSigner, SignerError};
