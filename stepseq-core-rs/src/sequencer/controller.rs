use tinyrand::Rand;

use crate::analog::ControlInputs;
use crate::midi::TransportEvent;

use super::config::SequencerConfig;
use super::engine::Sequencer;
use super::output::{Notifier, StepOutputs};
use super::state::SequencerState;

/// Sequencer wired to its outputs.
///
/// This is what the firmware control loop owns. Each entry point runs the
/// matching [`Sequencer`] handler and immediately applies the resulting
/// [`OutputCommand`](super::OutputCommand) through the [`Notifier`].
/// Output errors are returned to the caller; the sequencer state has already
/// been updated by then, so a failed pin write never desynchronises the
/// step position.
pub struct Controller<O, R> {
    sequencer: Sequencer<R>,
    outputs: O,
    notifier: Notifier,
}

impl<O, R> Controller<O, R>
where
    O: StepOutputs,
    R: Rand,
{
    /// Build a controller. No output is touched until the first event.
    pub fn new(config: &SequencerConfig, outputs: O, rng: R) -> Self {
        Self {
            sequencer: Sequencer::new(config, rng),
            outputs,
            notifier: Notifier::new(config.pulse_duration_ms),
        }
    }

    /// Returns the sequencer state.
    pub fn state(&self) -> &SequencerState {
        self.sequencer.state()
    }

    /// Returns the output implementation.
    pub fn outputs(&self) -> &O {
        &self.outputs
    }

    /// Returns the output implementation mutably.
    pub fn outputs_mut(&mut self) -> &mut O {
        &mut self.outputs
    }

    /// Handle a transport event received at `now_ms`.
    pub fn on_transport(
        &mut self,
        event: TransportEvent,
        inputs: ControlInputs,
        now_ms: u64,
    ) -> Result<(), O::Error> {
        match self.sequencer.handle(event, inputs) {
            Some(command) => self.notifier.apply(&mut self.outputs, command, now_ms),
            None => Ok(()),
        }
    }

    /// Handle a debounced press of the mode button at `now_ms`.
    pub fn on_press(&mut self, now_ms: u64) -> Result<(), O::Error> {
        match self.sequencer.manual_press() {
            Some(command) => self.notifier.apply(&mut self.outputs, command, now_ms),
            None => Ok(()),
        }
    }

    /// End the indicator pulse once its deadline has passed.
    pub fn service(&mut self, now_ms: u64) -> Result<(), O::Error> {
        self.notifier.service(&mut self.outputs, now_ms)?;
        Ok(())
    }
}
