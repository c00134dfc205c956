//! # Protocol Parameters
//!
//! Network-wide constants. Every node must run with identical values, so the
//! parameters are loaded once (usually from a JSON document) and validated
//! before any mana is computed with them.

use serde::{Deserialize, Serialize};
use shared_crypto::blake3_hash;
use std::path::Path;

use crate::errors::ParametersError;
use crate::identifiers::{BaseToken, SlotIndex};
use crate::time::TimeProvider;
use crate::work_score::WorkScoreParameters;

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Mana generation and decay constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaParameters {
    /// Logical width of a mana value.
    pub bits_count: u8,
    /// Mana generated per base token per slot, scaled by `2^-generation_rate_exponent`.
    pub generation_rate: u8,
    pub generation_rate_exponent: u8,
    /// `decay_factors[i]` decays by `i + 1` epochs, scaled by `2^-decay_factors_exponent`.
    pub decay_factors: Vec<u32>,
    pub decay_factors_exponent: u8,
    /// Sum of decay over an unbounded number of epochs.
    pub decay_factor_epochs_sum: u32,
    pub decay_factor_epochs_sum_exponent: u8,
    /// Informational. Percentage of mana left after one year.
    pub annual_decay_factor_percentage: u8,
}

/// Inputs to [`ManaParameters::derive`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ManaDerivation {
    pub beta_per_year: f64,
    pub slot_duration_seconds: u16,
    pub slots_per_epoch_exponent: u8,
    pub generation_rate: u8,
    pub generation_rate_exponent: u8,
    pub decay_factors_exponent: u8,
    pub decay_factor_epochs_sum_exponent: u8,
    pub annual_decay_factor_percentage: u8,
}

impl Default for ManaDerivation {
    fn default() -> Self {
        Self {
            beta_per_year: 1.0 / 3.0,
            slot_duration_seconds: 10,
            slots_per_epoch_exponent: 13,
            generation_rate: 1,
            generation_rate_exponent: 17,
            decay_factors_exponent: 32,
            decay_factor_epochs_sum_exponent: 21,
            annual_decay_factor_percentage: 70,
        }
    }
}

impl ManaParameters {
    /// Computes the decay table and epochs sum for an exponential decay of
    /// `beta_per_year`.
    ///
    /// Uses floating point. Run it to produce a parameter set, never while
    /// computing mana.
    pub fn derive(d: ManaDerivation) -> Self {
        let slots_per_epoch = (1u64 << d.slots_per_epoch_exponent) as f64;
        let epochs_per_year = SECONDS_PER_YEAR / f64::from(d.slot_duration_seconds) / slots_per_epoch;
        let beta_per_epoch = d.beta_per_year / epochs_per_year;
        let decay_scale = 2f64.powi(i32::from(d.decay_factors_exponent));

        let decay_factors = (1..=epochs_per_year as u32)
            .map(|epoch| ((-beta_per_epoch * f64::from(epoch)).exp() * decay_scale) as u32)
            .collect();

        let delta = slots_per_epoch * f64::from(d.slot_duration_seconds) / SECONDS_PER_YEAR;
        let decay_per_epoch = (-d.beta_per_year * delta).exp();
        let decay_factor_epochs_sum = (decay_per_epoch / (1.0 - decay_per_epoch)
            * 2f64.powi(i32::from(d.decay_factor_epochs_sum_exponent)))
            as u32;

        Self {
            bits_count: 63,
            generation_rate: d.generation_rate,
            generation_rate_exponent: d.generation_rate_exponent,
            decay_factors,
            decay_factors_exponent: d.decay_factors_exponent,
            decay_factor_epochs_sum,
            decay_factor_epochs_sum_exponent: d.decay_factor_epochs_sum_exponent,
            annual_decay_factor_percentage: d.annual_decay_factor_percentage,
        }
    }
}

impl Default for ManaParameters {
    fn default() -> Self {
        Self::derive(ManaDerivation::default())
    }
}

/// The full parameter set of a network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolParameters {
    pub version: u8,
    pub network_name: String,
    pub bech32_hrp: String,
    pub token_supply: BaseToken,
    pub genesis_slot: SlotIndex,
    pub genesis_unix_timestamp: i64,
    pub slot_duration_in_seconds: u16,
    pub slots_per_epoch_exponent: u8,
    pub mana_parameters: ManaParameters,
    pub work_score_parameters: WorkScoreParameters,
    pub min_committable_age: SlotIndex,
    /// Mana on outputs timelocked at least this far past creation and owned
    /// by an account counts as bound to that account.
    pub max_committable_age: SlotIndex,
}

impl Default for ProtocolParameters {
    fn default() -> Self {
        Self {
            version: 3,
            network_name: "testnet".to_string(),
            bech32_hrp: "rms".to_string(),
            token_supply: 1_813_620_509_061_365,
            genesis_slot: 0,
            genesis_unix_timestamp: 1_695_275_822,
            slot_duration_in_seconds: 10,
            slots_per_epoch_exponent: 13,
            mana_parameters: ManaParameters::default(),
            work_score_parameters: WorkScoreParameters::default(),
            min_committable_age: 10,
            max_committable_age: 20,
        }
    }
}

impl ProtocolParameters {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ParametersError> {
        let params: Self =
            serde_json::from_str(json).map_err(|e| ParametersError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParametersError> {
        let json =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ParametersError::Io(e.to_string()))?;
        Self::from_json_str(&json)
    }

    /// First eight bytes of the hashed network name, little endian.
    pub fn network_id(&self) -> u64 {
        let hash = blake3_hash(self.network_name.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash[..8]);
        u64::from_le_bytes(bytes)
    }

    pub fn time_provider(&self) -> TimeProvider {
        TimeProvider::new(
            self.genesis_slot,
            self.genesis_unix_timestamp,
            self.slot_duration_in_seconds,
            self.slots_per_epoch_exponent,
        )
    }

    /// Rejects parameter sets the fixed-point mana math cannot run with.
    pub fn validate(&self) -> Result<(), ParametersError> {
        if self.slot_duration_in_seconds == 0 {
            return Err(ParametersError::ZeroSlotDuration);
        }
        if self.slots_per_epoch_exponent >= 32 {
            return Err(ParametersError::InvalidExponent {
                name: "slots_per_epoch_exponent",
                value: self.slots_per_epoch_exponent,
            });
        }

        let mana = &self.mana_parameters;
        if mana.bits_count == 0 || mana.bits_count > 64 {
            return Err(ParametersError::InvalidExponent {
                name: "bits_count",
                value: mana.bits_count,
            });
        }
        for (name, value) in [
            ("generation_rate_exponent", mana.generation_rate_exponent),
            ("decay_factors_exponent", mana.decay_factors_exponent),
            ("decay_factor_epochs_sum_exponent", mana.decay_factor_epochs_sum_exponent),
        ] {
            if value >= 64 {
                return Err(ParametersError::InvalidExponent { name, value });
            }
        }

        let combined = u16::from(mana.decay_factor_epochs_sum_exponent)
            + u16::from(mana.generation_rate_exponent);
        if combined < u16::from(self.slots_per_epoch_exponent) || combined >= 64 + 32 {
            return Err(ParametersError::InvalidExponent {
                name: "decay_factor_epochs_sum_exponent",
                value: mana.decay_factor_epochs_sum_exponent,
            });
        }

        // a factor above one would grow mana instead of decaying it
        let unity = 1u64 << mana.decay_factors_exponent;
        if let Some((index, factor)) = mana
            .decay_factors
            .iter()
            .enumerate()
            .find(|(_, f)| u64::from(**f) > unity)
        {
            return Err(ParametersError::DecayFactorTooLarge {
                index,
                value: u64::from(*factor),
            });
        }

        if u64::from(mana.decay_factor_epochs_sum) * u64::from(mana.generation_rate) > u64::from(u32::MAX) {
            return Err(ParametersError::EpochsSumFactorTooLarge {
                sum: mana.decay_factor_epochs_sum,
                rate: mana.generation_rate,
            });
        }
        Ok(())
    }
}
