//! # Mana Decay Provider
//!
//! Decays stored mana across epochs and generates potential mana from held
//! base tokens across slots. Every function here is consensus critical: all
//! nodes must compute identical values from identical parameters.
//!
//! ## Potential Mana Across Epochs
//!
//! For an output created in epoch `e0` and consumed in epoch `e1`:
//!
//! | `e1 - e0` | Result |
//! |-----------|--------|
//! | 0 | generation over the elapsed slots |
//! | 1 | decayed generation for the rest of `e0` plus generation in `e1` |
//! | > 1 | closed form using the precomputed epochs sum constant |

use shared_types::{
    BaseToken, EpochIndex, Mana, ManaParameters, ParametersError, SlotIndex, TimeProvider,
};
use shared_types::safemath::{safe_add, safe_sub};

use super::errors::ManaError;
use super::fixed_point::{
    fixed_point_multiplication32, fixed_point_multiplication32_splitted, merge_u64, split_u64,
};

/// Stateless mana math bound to one parameter set.
#[derive(Clone, Debug)]
pub struct ManaDecayProvider {
    time_provider: TimeProvider,
    slots_per_epoch_exponent: u32,
    generation_rate: u64,
    generation_rate_exponent: u32,
    decay_factors: Vec<u32>,
    decay_factors_exponent: u32,
    decay_factor_epochs_sum: u64,
    decay_factor_epochs_sum_exponent: u32,
}

impl ManaDecayProvider {
    /// Binds the provider to `parameters`.
    ///
    /// Fails if the decay factors cannot be applied with the split
    /// multiplication, which supports scales up to 32.
    pub fn new(
        time_provider: TimeProvider,
        slots_per_epoch_exponent: u8,
        parameters: &ManaParameters,
    ) -> Result<Self, ManaError> {
        if parameters.decay_factors_exponent > 32 {
            return Err(ParametersError::InvalidExponent {
                name: "decay_factors_exponent",
                value: parameters.decay_factors_exponent,
            }
            .into());
        }

        Ok(Self {
            time_provider,
            slots_per_epoch_exponent: u32::from(slots_per_epoch_exponent),
            generation_rate: u64::from(parameters.generation_rate),
            generation_rate_exponent: u32::from(parameters.generation_rate_exponent),
            decay_factors: parameters.decay_factors.clone(),
            decay_factors_exponent: u32::from(parameters.decay_factors_exponent),
            decay_factor_epochs_sum: u64::from(parameters.decay_factor_epochs_sum),
            decay_factor_epochs_sum_exponent: u32::from(parameters.decay_factor_epochs_sum_exponent),
        })
    }

    pub fn time_provider(&self) -> &TimeProvider {
        &self.time_provider
    }

    /// Applies `epoch_diff` epochs of decay to `value`.
    ///
    /// The table covers at most `decay_factors.len()` epochs, so longer spans
    /// are decayed in several steps.
    pub fn decay(&self, value: Mana, epoch_diff: EpochIndex) -> Mana {
        if value == 0 || epoch_diff == 0 || self.decay_factors.is_empty() {
            return value;
        }

        let table_len = u32::try_from(self.decay_factors.len()).unwrap_or(u32::MAX);
        let (mut hi, mut lo) = split_u64(value);
        let mut remaining = epoch_diff;
        while remaining > 0 {
            let step = remaining.min(table_len);
            let factor = u64::from(self.decay_factors[(step - 1) as usize]);
            (hi, lo) = fixed_point_multiplication32_splitted(hi, lo, factor, self.decay_factors_exponent);
            remaining -= step;
        }
        merge_u64(hi, lo)
    }

    /// Mana generated by holding `amount` for `slot_diff` slots, undecayed.
    pub fn generate_mana(&self, amount: BaseToken, slot_diff: SlotIndex) -> Mana {
        if slot_diff == 0 || self.generation_rate == 0 {
            return 0;
        }
        fixed_point_multiplication32(
            amount,
            u64::from(slot_diff) * self.generation_rate,
            self.generation_rate_exponent,
        )
    }

    /// Decays `mana` stored on an output created in `creation_slot` up to `target_slot`.
    pub fn decay_mana_by_slots(
        &self,
        mana: Mana,
        creation_slot: SlotIndex,
        target_slot: SlotIndex,
    ) -> Result<Mana, ManaError> {
        let creation = self.time_provider.epoch_from_slot(creation_slot);
        let target = self.time_provider.epoch_from_slot(target_slot);
        self.decay_mana_by_epochs(mana, creation, target)
    }

    pub fn decay_mana_by_epochs(
        &self,
        mana: Mana,
        creation_epoch: EpochIndex,
        target_epoch: EpochIndex,
    ) -> Result<Mana, ManaError> {
        if creation_epoch > target_epoch {
            return Err(ManaError::WrongEpochIndex {
                creation: creation_epoch,
                target: target_epoch,
            });
        }
        Ok(self.decay(mana, target_epoch - creation_epoch))
    }

    /// Potential mana of `amount` base tokens held from `creation_slot` to
    /// `target_slot`, including the decay of mana generated in earlier epochs.
    pub fn generate_mana_and_decay_by_slots(
        &self,
        amount: BaseToken,
        creation_slot: SlotIndex,
        target_slot: SlotIndex,
    ) -> Result<Mana, ManaError> {
        let tp = &self.time_provider;
        let creation_epoch = tp.epoch_from_slot(creation_slot);
        let target_epoch = tp.epoch_from_slot(target_slot);
        if creation_epoch > target_epoch {
            return Err(ManaError::WrongEpochIndex {
                creation: creation_epoch,
                target: target_epoch,
            });
        }

        match target_epoch - creation_epoch {
            0 => {
                if creation_slot > target_slot {
                    return Err(ManaError::WrongSlotIndex {
                        creation: creation_slot,
                        target: target_slot,
                    });
                }
                Ok(self.generate_mana(amount, target_slot - creation_slot))
            }
            1 => {
                let decayed = self.decay(
                    self.generate_mana(amount, tp.slots_before_next_epoch(creation_slot)),
                    1,
                );
                let generated = self.generate_mana(amount, tp.slots_since_epoch_start(target_slot));
                Ok(safe_add(decayed, generated)?)
            }
            epoch_diff => {
                let scale = safe_sub(
                    u64::from(self.decay_factor_epochs_sum_exponent + self.generation_rate_exponent),
                    u64::from(self.slots_per_epoch_exponent),
                )?;
                let c = fixed_point_multiplication32(
                    amount,
                    self.decay_factor_epochs_sum * self.generation_rate,
                    scale as u32,
                );

                let first = self.decay(
                    self.generate_mana(amount, tp.slots_before_next_epoch(creation_slot)),
                    epoch_diff,
                );
                let intermediate = safe_sub(c, self.decay(c, epoch_diff - 1))?;
                let last = self.generate_mana(amount, tp.slots_since_epoch_start(target_slot));

                let total = safe_add(safe_add(intermediate, last)?, first)?;
                Ok(safe_sub(total, c >> self.decay_factors_exponent)?)
            }
        }
    }
}
