//! Step-progression state machine.
//!
//! This module owns the [`SequencerState`] that decides which of the eight
//! step outputs is active. It is driven by three kinds of input, all handled
//! on a single control loop:
//!
//! ```text
//! Tick ──► clock divider ──(gate open)──► traversal ──► OutputCommand::Show
//! Start/Stop ──► transport ──────────────────────────► Show(0) / Clear
//! Button edge ──► running?  cycle traversal mode
//!                 stopped?  step forward by one ─────► OutputCommand::Show
//! ```
//!
//! The [`Sequencer`] never touches hardware. It returns an
//! [`OutputCommand`] which the [`Controller`] applies to a [`StepOutputs`]
//! implementation together with the shared pulse indicator.
//!
//! # Tick counting
//!
//! The tick counter is compared against the division factor *before* it is
//! incremented, and it is incremented on every tick whether or not the gate
//! opened and whether or not the transport is running. The counter wraps at
//! [`TICK_COUNTER_PERIOD`], the least common multiple of [`DIVISORS`], so the
//! phase of every divisor survives the wrap.

mod clock;
mod config;
mod controller;
mod engine;
mod error;
mod mode;
mod output;
mod state;
mod traversal;

pub use clock::{division_factor, should_advance};
pub use config::SequencerConfig;
pub use controller::Controller;
pub use engine::Sequencer;
pub use error::SequencerError;
pub use mode::TraversalMode;
pub use output::{Notifier, OutputCommand, PulseIndicator, StepOutputs};
pub use state::{SequencerState, TransportState};
pub use traversal::advance;

/// Number of physical step outputs on the board.
pub const NUM_STEPS: usize = 8;

/// Largest step count the step-count potentiometer can select.
pub const MAX_STEPS: usize = NUM_STEPS;

/// Clock division factors, fastest first.
///
/// Index 0 advances on every tick; index 4 advances once per 24 ticks
/// (one quarter note at 24 PPQN).
pub const DIVISORS: [u32; 5] = [1, 3, 6, 12, 24];

/// Wrap point for the tick counter. Every entry of [`DIVISORS`] divides it.
pub const TICK_COUNTER_PERIOD: u32 = 24;

/// Default length of the indicator pulse in milliseconds.
pub const DEFAULT_PULSE_MS: u64 = 20;
