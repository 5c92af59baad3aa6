use super::error::SequencerError;
use super::mode::TraversalMode;
use super::DEFAULT_PULSE_MS;

/// Tunable behaviour of the sequencer and its control inputs.
///
/// [`SequencerConfig::default()`] matches the shipped hardware: a 20 ms
/// indicator pulse, 5 ms button debounce and Forward traversal at power-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerConfig {
    /// Length of the indicator pulse emitted on every step change. Default: 20.
    pub pulse_duration_ms: u64,
    /// Minimum stable time before a button level change is accepted. Default: 5.
    pub debounce_ms: u64,
    /// Seed for the Random traversal generator.
    pub rng_seed: u64,
    /// Traversal mode at power-on. Default: Forward.
    pub initial_mode: TraversalMode,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            pulse_duration_ms: DEFAULT_PULSE_MS,
            debounce_ms: 5,
            rng_seed: 0x5EED_0F_57E9,
            initial_mode: TraversalMode::Forward,
        }
    }
}

impl SequencerConfig {
    /// Check the configuration for values the control loop cannot honour.
    ///
    /// Returns [`SequencerError::InvalidPulseDuration`] if the pulse length
    /// is zero.
    pub fn validate(&self) -> Result<(), SequencerError> {
        if self.pulse_duration_ms == 0 {
            return Err(SequencerError::InvalidPulseDuration);
        }
        Ok(())
    }
}
