//! Board-agnostic logic for the eight-step sequencer.
//!
//! Everything in this crate runs on the host as well as on the RP2350, so the
//! whole step-progression state machine is covered by `cargo test`.
//!
//! - [`sequencer`] — state, clock divider, traversal modes, transport and
//!   manual-input handling, and the output notifier contract.
//! - [`midi`] — realtime transport byte parser (clock, start, stop).
//! - [`analog`] — potentiometer reading to step count / division mapping.
//! - [`button`] — debounced press-edge detector for the mode button.
//!
//! # Crate Features
//!
//! - **`defmt`** — derive [`defmt::Format`] on public types and emit log
//!   lines for transport changes and clamped inputs.

#![no_std]

pub mod analog;
pub mod button;
pub mod midi;
pub mod sequencer;
