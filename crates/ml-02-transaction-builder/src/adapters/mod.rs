//! # Adapters Layer - Transaction Builder
//!
//! - `in_memory_signer`: AddressSigner over Ed25519 key pairs held in memory

pub mod in_memory_signer;

pub use in_memory_signer::InMemoryAddressSigner;
