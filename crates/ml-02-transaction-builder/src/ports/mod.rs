//! # Ports Layer - Transaction Builder
//!
//! - `outbound`: AddressSigner, the only collaborator the builder drives

pub mod outbound;

pub use outbound::*;
