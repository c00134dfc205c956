//! Integration scenarios.

pub mod fixtures;

mod builder_flows;
mod mana_flows;
mod unlock_flows;
