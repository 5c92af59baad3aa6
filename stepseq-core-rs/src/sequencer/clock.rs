//! Clock divider.

use super::error::SequencerError;
use super::DIVISORS;

/// Returns `true` when the tick at `tick_counter` should advance the
/// sequence.
///
/// Defined as `tick_counter % division_factor == 0`. A `division_factor` of
/// zero is treated as 1 so the gate can never divide by zero.
///
/// # Examples
///
/// ```
/// use stepseq::sequencer::should_advance;
///
/// let open: [bool; 7] = core::array::from_fn(|t| should_advance(t as u32, 3));
/// assert_eq!(open, [true, false, false, true, false, false, true]);
/// ```
pub fn should_advance(tick_counter: u32, division_factor: u32) -> bool {
    tick_counter % division_factor.max(1) == 0
}

/// Look up the division factor for a division index.
///
/// Returns [`SequencerError::InvalidDivisionIndex`] if `index >= DIVISORS.len()`.
pub fn division_factor(index: usize) -> Result<u32, SequencerError> {
    DIVISORS
        .get(index)
        .copied()
        .ok_or(SequencerError::InvalidDivisionIndex)
}
