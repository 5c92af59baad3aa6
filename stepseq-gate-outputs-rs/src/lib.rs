//! GPIO driver for the sequencer's step gates and pulse indicator.
//!
//! [`GateOutputs`] owns one output pin per step plus the shared indicator
//! LED and implements [`stepseq::sequencer::StepOutputs`], so the sequencer
//! [`Controller`](stepseq::sequencer::Controller) can drive real hardware.
//! Any `embedded-hal` 1.0 [`OutputPin`](embedded_hal::digital::OutputPin)
//! works; on the RP2350 that is `embassy_rp::gpio::Output`.
//!
//! # Quick start
//!
//! ```ignore
//! use gate_driver::GateOutputs;
//!
//! let mut gates = GateOutputs::new(step_pins, led_pin);
//! gates.init()?;
//! ```
//!
//! # Features
//!
//! - **`defmt`** — Enable [`defmt::Format`] implementations on error types
//!   for embedded logging.

#![no_std]

pub use error::GateError;
pub use gates::GateOutputs;

mod error;
mod gates;
