//! Output notifier.
//!
//! The sequencer state machine reports every visible change as an
//! [`OutputCommand`]. [`Notifier::apply()`] turns that command into calls on
//! a [`StepOutputs`] implementation (the physical gate driver, or a mock in
//! tests) and arms the shared indicator pulse.
//!
//! The indicator pulse is deadline based: [`PulseIndicator`] stores the time
//! the pulse ends and the control loop switches the indicator off from
//! [`Notifier::service()`]. Nothing blocks, so transport bytes arriving
//! during a pulse are still seen on the next poll.

/// Hardware-facing side of the output notifier.
///
/// Implementors own the eight step outputs and the shared pulse indicator.
pub trait StepOutputs {
    /// Error raised by the underlying pins.
    type Error;

    /// Activate step `step` and deactivate every other step output.
    fn show_step(&mut self, step: usize) -> Result<(), Self::Error>;

    /// Deactivate every step output.
    fn clear_steps(&mut self) -> Result<(), Self::Error>;

    /// Switch the shared pulse indicator on or off.
    fn set_indicator(&mut self, on: bool) -> Result<(), Self::Error>;
}

/// A visible change requested by the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputCommand {
    /// Make `step` the only active output and pulse the indicator.
    Show(usize),
    /// Extinguish every step output and the indicator.
    Clear,
}

/// Deadline for the shared indicator pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseIndicator {
    /// Time (ms) at which the active pulse ends. `None` when idle.
    ends_at: Option<u64>,
}

impl PulseIndicator {
    /// Idle indicator.
    pub const fn new() -> Self {
        Self { ends_at: None }
    }

    /// Start (or restart) a pulse at `now_ms` lasting `duration_ms`.
    pub fn trigger(&mut self, now_ms: u64, duration_ms: u64) {
        self.ends_at = Some(now_ms.saturating_add(duration_ms));
    }

    /// Forget any pending pulse without reporting it as expired.
    pub fn cancel(&mut self) {
        self.ends_at = None;
    }

    /// Returns `true` while a pulse is in progress.
    pub fn is_active(&self) -> bool {
        self.ends_at.is_some()
    }

    /// Returns `true` exactly once, on the first call at or after the pulse
    /// end time. The indicator is idle afterwards.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.ends_at {
            Some(end) if now_ms >= end => {
                self.ends_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Applies [`OutputCommand`]s to a [`StepOutputs`] implementation.
#[derive(Debug, Clone, Copy)]
pub struct Notifier {
    pulse: PulseIndicator,
    pulse_duration_ms: u64,
}

impl Notifier {
    /// Create a notifier whose indicator pulses last `pulse_duration_ms`.
    pub const fn new(pulse_duration_ms: u64) -> Self {
        Self {
            pulse: PulseIndicator::new(),
            pulse_duration_ms,
        }
    }

    /// Returns the current pulse state.
    pub fn pulse(&self) -> &PulseIndicator {
        &self.pulse
    }

    /// Drive the outputs for `command`.
    ///
    /// `Show(n)` activates step `n` (all others off), switches the indicator
    /// on and arms the pulse deadline. `Clear` switches every step and the
    /// indicator off.
    pub fn apply<O: StepOutputs>(
        &mut self,
        outputs: &mut O,
        command: OutputCommand,
        now_ms: u64,
    ) -> Result<(), O::Error> {
        match command {
            OutputCommand::Show(step) => {
                outputs.show_step(step)?;
                outputs.set_indicator(true)?;
                self.pulse.trigger(now_ms, self.pulse_duration_ms);
            }
            OutputCommand::Clear => {
                outputs.clear_steps()?;
                outputs.set_indicator(false)?;
                self.pulse.cancel();
            }
        }
        Ok(())
    }

    /// Switch the indicator off once the pulse deadline has passed.
    ///
    /// Call on every control-loop iteration. Returns `true` when the
    /// indicator was switched off by this call.
    pub fn service<O: StepOutputs>(&mut self, outputs: &mut O, now_ms: u64) -> Result<bool, O::Error> {
        if self.pulse.expire(now_ms) {
            outputs.set_indicator(false)?;
            return Ok(true);
        }
        Ok(false)
    }
}
