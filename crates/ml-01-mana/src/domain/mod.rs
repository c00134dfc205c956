//! # Domain Layer - Mana Engine
//!
//! ## Components
//!
//! - `fixed_point`: split 32-bit fixed-point multiplication
//! - `decay`: ManaDecayProvider (decay and generation)
//! - `accountant`: ManaBalanceAccountant and AvailableManaResult
//! - `errors`: ManaError enumeration

pub mod accountant;
pub mod decay;
pub mod errors;
pub mod fixed_point;

pub use accountant::*;
pub use decay::*;
pub use errors::*;
pub use fixed_point::*;
