/// Errors reported by sequencer configuration and lookup helpers.
///
/// Runtime inputs (pot readings, transport bytes, button edges) are clamped
/// rather than rejected, so these only surface from explicit lookups such as
/// [`division_factor()`](super::division_factor) and
/// [`SequencerConfig::validate()`](super::SequencerConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerError {
    /// Step count is outside `1..=MAX_STEPS`.
    InvalidStepCount,
    /// Division index is out of bounds (must be < DIVISORS.len()).
    InvalidDivisionIndex,
    /// Pulse duration of zero would never light the indicator.
    InvalidPulseDuration,
}
