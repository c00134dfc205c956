//! # Mana Ledger Test Suite
//!
//! Cross-crate scenarios that drive the transaction builder against a real
//! [`ml_01_mana::Api`] and an in-memory signer.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs        # Shared wallet and input helpers
//!     ├── mana_flows.rs      # Decay and generation over epoch boundaries
//!     ├── unlock_flows.rs    # Signature dedup, restricted and chain unlocks
//!     └── builder_flows.rs   # Allotment policies and block cost
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ml-tests
//!
//! # By category
//! cargo test -p ml-tests integration::unlock_flows
//! ```

pub mod integration;
