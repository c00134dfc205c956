//! # Api Handle
//!
//! Bundles the protocol parameters with the services derived from them. One
//! handle is built per parameter set and shared behind an `Arc`.

use shared_types::{ProtocolParameters, TimeProvider};
use tracing::debug;

use crate::domain::{ManaBalanceAccountant, ManaDecayProvider, ManaError};

#[derive(Clone, Debug)]
pub struct Api {
    protocol_parameters: ProtocolParameters,
    time_provider: TimeProvider,
    mana_decay_provider: ManaDecayProvider,
}

impl Api {
    /// Validates `protocol_parameters` and derives the time and mana services.
    pub fn new(protocol_parameters: ProtocolParameters) -> Result<Self, ManaError> {
        protocol_parameters.validate()?;
        let time_provider = protocol_parameters.time_provider();
        let mana_decay_provider = ManaDecayProvider::new(
            time_provider,
            protocol_parameters.slots_per_epoch_exponent,
            &protocol_parameters.mana_parameters,
        )?;

        debug!(
            network = %protocol_parameters.network_name,
            network_id = protocol_parameters.network_id(),
            decay_factors = protocol_parameters.mana_parameters.decay_factors.len(),
            "protocol parameters loaded"
        );

        Ok(Self {
            protocol_parameters,
            time_provider,
            mana_decay_provider,
        })
    }

    pub fn protocol_parameters(&self) -> &ProtocolParameters {
        &self.protocol_parameters
    }

    pub fn time_provider(&self) -> &TimeProvider {
        &self.time_provider
    }

    pub fn mana_decay_provider(&self) -> &ManaDecayProvider {
        &self.mana_decay_provider
    }

    pub fn mana_balance_accountant(&self) -> ManaBalanceAccountant<'_> {
        ManaBalanceAccountant::new(
            &self.mana_decay_provider,
            self.protocol_parameters.max_committable_age,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::ParametersError;

    #[test]
    fn test_api_from_default_parameters() {
        let api = Api::new(ProtocolParameters::default()).unwrap();
        assert_eq!(api.time_provider().epoch_from_slot(1 << 13), 1);
        assert_eq!(api.mana_decay_provider().decay(0, 10), 0);
    }

    #[test]
    fn test_api_rejects_invalid_parameters() {
        let params = ProtocolParameters {
            slot_duration_in_seconds: 0,
            ..ProtocolParameters::default()
        };
        assert_eq!(
            Api::new(params).unwrap_err(),
            ManaError::Parameters(ParametersError::ZeroSlotDuration)
        );
    }
}
