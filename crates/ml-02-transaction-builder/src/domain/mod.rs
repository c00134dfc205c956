//! # Domain Layer - Transaction Builder
//!
//! ## Components
//!
//! - `builder`: TransactionBuilder with deferred errors and mana policies
//! - `unlock_resolver`: one unlock per input, signatures deduplicated by key
//! - `block_builder`: BasicBlockBuilder for wrapping and pricing payloads
//! - `errors`: BuilderError enumeration

pub mod block_builder;
pub mod builder;
pub mod errors;
pub mod unlock_resolver;

pub use block_builder::*;
pub use builder::*;
pub use errors::*;
pub use unlock_resolver::*;
