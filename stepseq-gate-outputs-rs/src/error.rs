//! Error types for the gate driver.

use core::fmt;

/// Errors that can occur when driving the gate outputs.
#[derive(Debug, PartialEq, Eq)]
pub enum GateError<E> {
    /// Underlying GPIO pin error.
    Pin(E),

    /// Step index has no matching output pin.
    InvalidStep,
}

// Allow ergonomic `?` propagation from raw pin errors.
impl<E> From<E> for GateError<E> {
    fn from(error: E) -> Self {
        GateError::Pin(error)
    }
}

impl<E: fmt::Debug> fmt::Display for GateError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GateError::Pin(e) => write!(f, "Pin error: {:?}", e),
            GateError::InvalidStep => write!(f, "Invalid step index"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for GateError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            GateError::Pin(e) => defmt::write!(f, "Pin error: {}", e),
            GateError::InvalidStep => defmt::write!(f, "Invalid step index"),
        }
    }
}
