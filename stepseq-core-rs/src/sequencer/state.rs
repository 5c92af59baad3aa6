use super::mode::TraversalMode;
use super::{MAX_STEPS, TICK_COUNTER_PERIOD};

/// Transport position as seen by the rest of the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportState {
    /// Between power-on or Stop and the next Start.
    Stopped,
    /// Between Start and Stop.
    Running,
}

/// Complete step-progression state of the sequencer.
///
/// There is exactly one instance per device, owned by the
/// [`Sequencer`](super::Sequencer) and mutated only from the control loop.
///
/// **Invariant:** while running, `current_step < active_step_count` after
/// every handler returns. While stopped, manual stepping walks all
/// [`NUM_STEPS`](super::NUM_STEPS) outputs and the next gated tick clamps the
/// step back into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequencerState {
    /// Index of the active step output.
    pub current_step: usize,
    /// Step count last read from the step-count input, in `1..=MAX_STEPS`.
    pub active_step_count: usize,
    /// Ticks seen since the last Start, modulo [`TICK_COUNTER_PERIOD`].
    pub tick_counter: u32,
    /// `true` between Start and Stop.
    pub is_running: bool,
    /// Traversal policy applied on gated ticks.
    pub traversal_mode: TraversalMode,
    /// PingPong direction, `true` while counting up.
    pub pingpong_direction: bool,
}

impl Default for SequencerState {
    fn default() -> Self {
        Self::new(TraversalMode::Forward)
    }
}

impl SequencerState {
    /// Power-on state: step 0, stopped, full step range.
    pub fn new(mode: TraversalMode) -> Self {
        Self {
            current_step: 0,
            active_step_count: MAX_STEPS,
            tick_counter: 0,
            is_running: false,
            traversal_mode: mode,
            pingpong_direction: true,
        }
    }

    /// Returns the transport state derived from `is_running`.
    pub fn transport(&self) -> TransportState {
        if self.is_running {
            TransportState::Running
        } else {
            TransportState::Stopped
        }
    }

    /// Count one tick, wrapping at [`TICK_COUNTER_PERIOD`].
    pub(crate) fn count_tick(&mut self) {
        self.tick_counter = (self.tick_counter + 1) % TICK_COUNTER_PERIOD;
    }

    /// Pull `current_step` back inside `0..active_step_count`.
    ///
    /// A shrinking step count clamps to the last step rather than wrapping.
    pub(crate) fn clamp_step(&mut self) {
        if self.current_step >= self.active_step_count {
            self.current_step = self.active_step_count - 1;
        }
    }
}
