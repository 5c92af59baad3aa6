//! Potentiometer reading to control value mapping.
//!
//! Both pots are read as 10-bit values (`0..=ADC_MAX`). Scaling uses the same
//! truncating integer interpolation as the classic `map()` helper found on
//! microcontroller frameworks, so the top value of each output range is only
//! reached at full scale:
//!
//! ```text
//! out = reading * (out_max - out_min) / ADC_MAX + out_min
//! ```

use crate::sequencer::{DIVISORS, MAX_STEPS};

/// Full-scale 10-bit reading.
pub const ADC_MAX: u16 = 1023;

/// Snapshot of the two analog controls, taken once per control-loop pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlInputs {
    /// Number of steps in the running sequence, `1..=MAX_STEPS`.
    pub step_count: usize,
    /// Index into [`DIVISORS`], 0 being the fastest.
    pub division_index: usize,
}

impl Default for ControlInputs {
    fn default() -> Self {
        Self {
            step_count: MAX_STEPS,
            division_index: 0,
        }
    }
}

impl ControlInputs {
    /// Map both raw 10-bit readings.
    pub fn from_readings(step_reading: u16, division_reading: u16) -> Self {
        Self {
            step_count: step_count_from_reading(step_reading),
            division_index: division_index_from_reading(division_reading),
        }
    }
}

/// Map a step-count pot reading onto `1..=MAX_STEPS`.
///
/// # Examples
///
/// ```
/// use stepseq::analog::step_count_from_reading;
///
/// assert_eq!(step_count_from_reading(0), 1);
/// assert_eq!(step_count_from_reading(512), 4);
/// assert_eq!(step_count_from_reading(1023), 8);
/// ```
pub fn step_count_from_reading(reading: u16) -> usize {
    scale(reading, 1, MAX_STEPS as i32) as usize
}

/// Map a division pot reading onto a [`DIVISORS`] index.
///
/// The mapping is inverted: turning the pot up selects a smaller divisor,
/// so reading 0 gives the slowest division and full scale the fastest.
///
/// # Examples
///
/// ```
/// use stepseq::analog::division_index_from_reading;
/// use stepseq::sequencer::DIVISORS;
///
/// assert_eq!(DIVISORS[division_index_from_reading(0)], 24);
/// assert_eq!(DIVISORS[division_index_from_reading(1023)], 1);
/// ```
pub fn division_index_from_reading(reading: u16) -> usize {
    scale(reading, DIVISORS.len() as i32 - 1, 0) as usize
}

/// Convert a 12-bit RP2350 ADC sample to the 10-bit range used here.
pub fn from_12bit(raw: u16) -> u16 {
    raw.min(4095) >> 2
}

fn scale(reading: u16, out_min: i32, out_max: i32) -> i32 {
    let reading = i32::from(reading.min(ADC_MAX));
    // Division truncates toward zero, matching the integer `map()` helper.
    reading * (out_max - out_min) / i32::from(ADC_MAX) + out_min
}
