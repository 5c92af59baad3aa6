use tinyrand::Rand;

use crate::analog::ControlInputs;
use crate::midi::TransportEvent;

use super::clock::should_advance;
use super::config::SequencerConfig;
use super::output::OutputCommand;
use super::state::SequencerState;
use super::traversal::advance;
use super::{DIVISORS, NUM_STEPS};

/// The step-progression state machine.
///
/// Owns the single [`SequencerState`] and the random generator used by
/// [`TraversalMode::Random`](super::TraversalMode::Random). Every handler
/// returns the [`OutputCommand`] the outputs must reflect, or `None` when
/// nothing visible changed.
///
/// # Examples
///
/// ```
/// use stepseq::analog::ControlInputs;
/// use stepseq::sequencer::{OutputCommand, Sequencer, SequencerConfig};
/// use tinyrand::{Seeded, Wyrand};
///
/// let mut seq = Sequencer::new(&SequencerConfig::default(), Wyrand::seed(1));
/// let inputs = ControlInputs { step_count: 4, division_index: 0 };
///
/// assert_eq!(seq.start(), Some(OutputCommand::Show(0)));
/// assert_eq!(seq.tick(inputs), Some(OutputCommand::Show(1)));
/// assert_eq!(seq.stop(), Some(OutputCommand::Clear));
/// assert_eq!(seq.tick(inputs), None);
/// ```
pub struct Sequencer<R> {
    state: SequencerState,
    rng: R,
}

impl<R: Rand> Sequencer<R> {
    /// Power-on sequencer: stopped on step 0 in `config.initial_mode`.
    pub fn new(config: &SequencerConfig, rng: R) -> Self {
        Self {
            state: SequencerState::new(config.initial_mode),
            rng,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> &SequencerState {
        &self.state
    }

    // ── Transport ────────────────────────────────────────────────────

    /// Dispatch a transport event.
    ///
    /// `inputs` is only consulted for [`TransportEvent::Tick`].
    pub fn handle(&mut self, event: TransportEvent, inputs: ControlInputs) -> Option<OutputCommand> {
        match event {
            TransportEvent::Tick => self.tick(inputs),
            TransportEvent::Start => self.start(),
            TransportEvent::Stop => self.stop(),
        }
    }

    /// Start event: run from step 0 with a fresh tick phase.
    ///
    /// Resets `current_step`, `tick_counter` and the PingPong direction
    /// regardless of the previous state, and shows step 0.
    pub fn start(&mut self) -> Option<OutputCommand> {
        self.state.is_running = true;
        self.state.current_step = 0;
        self.state.tick_counter = 0;
        self.state.pingpong_direction = true;

        #[cfg(feature = "defmt")]
        defmt::info!("Transport start ({})", self.state.traversal_mode.name());

        Some(OutputCommand::Show(0))
    }

    /// Stop event: halt and extinguish every step output.
    pub fn stop(&mut self) -> Option<OutputCommand> {
        self.state.is_running = false;

        #[cfg(feature = "defmt")]
        defmt::info!("Transport stop at step {}", self.state.current_step);

        Some(OutputCommand::Clear)
    }

    /// Clock tick.
    ///
    /// The tick counter is always incremented, even while stopped, so the
    /// division phase carries across Stop and across divisor changes. The
    /// sequence only advances while running and when the divider gate is
    /// open for the counter value *before* the increment.
    pub fn tick(&mut self, inputs: ControlInputs) -> Option<OutputCommand> {
        let index = if inputs.division_index < DIVISORS.len() {
            inputs.division_index
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("tick: division index {} clamped", inputs.division_index);
            DIVISORS.len() - 1
        };

        let gate_open = should_advance(self.state.tick_counter, DIVISORS[index]);
        self.state.count_tick();

        if !self.state.is_running || !gate_open {
            return None;
        }

        let step = advance(&mut self.state, inputs.step_count, &mut self.rng);

        #[cfg(feature = "defmt")]
        defmt::debug!("Step {} of {}", step, self.state.active_step_count);

        Some(OutputCommand::Show(step))
    }

    // ── Manual input ─────────────────────────────────────────────────

    /// Debounced press of the mode button.
    ///
    /// While running, selects the next traversal mode (resetting the PingPong
    /// direction when PingPong is entered) and leaves the step untouched.
    /// While stopped, steps forward by one over all [`NUM_STEPS`] outputs and
    /// shows the new step.
    pub fn manual_press(&mut self) -> Option<OutputCommand> {
        if self.state.is_running {
            let mode = self.state.traversal_mode.next();
            self.state.traversal_mode = mode;
            if mode == super::TraversalMode::PingPong {
                self.state.pingpong_direction = true;
            }

            #[cfg(feature = "defmt")]
            defmt::debug!("Mode -> {}", mode.name());

            None
        } else {
            self.state.current_step = (self.state.current_step + 1) % NUM_STEPS;

            #[cfg(feature = "defmt")]
            defmt::debug!("Manual step -> {}", self.state.current_step);

            Some(OutputCommand::Show(self.state.current_step))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::TraversalMode;
    use tinyrand::{Seeded, Wyrand};

    fn seq() -> Sequencer<Wyrand> {
        Sequencer::new(&SequencerConfig::default(), Wyrand::seed(42))
    }

    fn inputs(step_count: usize, division_index: usize) -> ControlInputs {
        ControlInputs {
            step_count,
            division_index,
        }
    }

    // ── Transport ────────────────────────────────────────────────────

    #[test]
    fn start_resets_step_and_counter_from_any_state() {
        let mut s = seq();
        s.start();
        for _ in 0..5 {
            s.tick(inputs(8, 0));
        }
        s.manual_press(); // Reverse
        s.manual_press(); // PingPong
        assert_ne!(s.state().current_step, 0);
        assert_ne!(s.state().tick_counter, 0);

        assert_eq!(s.start(), Some(OutputCommand::Show(0)));
        assert_eq!(s.state().current_step, 0);
        assert_eq!(s.state().tick_counter, 0);
        assert!(s.state().is_running);
        assert!(s.state().pingpong_direction);
        // Mode survives a restart.
        assert_eq!(s.state().traversal_mode, TraversalMode::PingPong);
    }

    #[test]
    fn stop_clears_outputs_and_freezes_step() {
        let mut s = seq();
        s.start();
        s.tick(inputs(8, 0));
        s.tick(inputs(8, 0));
        assert_eq!(s.state().current_step, 2);

        assert_eq!(s.stop(), Some(OutputCommand::Clear));
        assert!(!s.state().is_running);

        for _ in 0..30 {
            assert_eq!(s.tick(inputs(8, 0)), None);
        }
        assert_eq!(s.state().current_step, 2);
    }

    #[test]
    fn stop_while_stopped_still_clears() {
        let mut s = seq();
        assert_eq!(s.stop(), Some(OutputCommand::Clear));
    }

    #[test]
    fn ticks_before_first_start_do_nothing() {
        let mut s = seq();
        assert_eq!(s.tick(inputs(8, 0)), None);
        assert_eq!(s.state().current_step, 0);
    }

    #[test]
    fn ticks_while_stopped_are_counted() {
        let mut s = seq();
        for _ in 0..5 {
            s.tick(inputs(8, 1));
        }
        assert_eq!(s.state().tick_counter, 5);
    }

    #[test]
    fn handle_dispatches_transport_events() {
        let mut s = seq();
        let i = inputs(4, 0);
        assert_eq!(s.handle(TransportEvent::Start, i), Some(OutputCommand::Show(0)));
        assert_eq!(s.handle(TransportEvent::Tick, i), Some(OutputCommand::Show(1)));
        assert_eq!(s.handle(TransportEvent::Stop, i), Some(OutputCommand::Clear));
    }

    // ── Clock division ───────────────────────────────────────────────

    #[test]
    fn first_tick_after_start_advances() {
        let mut s = seq();
        s.start();
        assert_eq!(s.tick(inputs(8, 4)), Some(OutputCommand::Show(1)));
    }

    #[test]
    fn divide_by_three_advances_on_ticks_0_3_6_9() {
        let mut s = seq();
        s.start();
        let mut advanced = [false; 12];
        for flag in advanced.iter_mut() {
            *flag = s.tick(inputs(8, 1)).is_some();
        }
        assert_eq!(
            advanced,
            [true, false, false, true, false, false, true, false, false, true, false, false]
        );
        assert_eq!(s.state().current_step, 4);
    }

    #[test]
    fn divisor_change_keeps_phase() {
        let mut s = seq();
        s.start();
        // Ticks 0..4 at divide-by-1: five advances.
        for _ in 0..5 {
            assert!(s.tick(inputs(8, 0)).is_some());
        }
        // Counter is now 5; divide-by-6 stays closed until tick 6.
        assert_eq!(s.tick(inputs(8, 2)), None);
        assert!(s.tick(inputs(8, 2)).is_some());
    }

    #[test]
    fn out_of_range_division_index_uses_slowest_divisor() {
        let mut s = seq();
        s.start();
        assert!(s.tick(inputs(8, 99)).is_some());
        for _ in 1..24 {
            assert_eq!(s.tick(inputs(8, 99)), None);
        }
        assert!(s.tick(inputs(8, 99)).is_some());
    }

    // ── Step count ───────────────────────────────────────────────────

    #[test]
    fn forward_sequence_on_four_steps() {
        let mut s = seq();
        s.start();
        let steps: [Option<OutputCommand>; 5] = core::array::from_fn(|_| s.tick(inputs(4, 0)));
        assert_eq!(
            steps,
            [1, 2, 3, 0, 1].map(|n| Some(OutputCommand::Show(n)))
        );
    }

    #[test]
    fn shrinking_step_count_mid_run_stays_in_range() {
        let mut s = seq();
        s.start();
        for _ in 0..6 {
            s.tick(inputs(8, 0));
        }
        assert_eq!(s.state().current_step, 6);

        let cmd = s.tick(inputs(3, 0));
        assert_eq!(cmd, Some(OutputCommand::Show(0)));
        assert_eq!(s.state().active_step_count, 3);
    }

    // ── Manual input ─────────────────────────────────────────────────

    #[test]
    fn manual_press_while_stopped_steps_over_all_outputs() {
        let mut s = seq();
        // Step-count input reads 3, but manual stepping ignores it.
        s.start();
        s.tick(inputs(3, 0));
        s.stop();
        assert_eq!(s.state().current_step, 1);

        let expected = [2, 3, 4, 5, 6, 7, 0, 1];
        for n in expected {
            assert_eq!(s.manual_press(), Some(OutputCommand::Show(n)));
        }
        assert_eq!(s.state().traversal_mode, TraversalMode::Forward);
    }

    #[test]
    fn manual_press_while_running_cycles_mode_only() {
        let mut s = seq();
        s.start();
        s.tick(inputs(8, 0));
        let step = s.state().current_step;

        let expected = [
            TraversalMode::Reverse,
            TraversalMode::PingPong,
            TraversalMode::Random,
            TraversalMode::Forward,
        ];
        for mode in expected {
            assert_eq!(s.manual_press(), None);
            assert_eq!(s.state().traversal_mode, mode);
            assert_eq!(s.state().current_step, step);
        }
    }

    #[test]
    fn entering_pingpong_resets_direction() {
        let mut s = seq();
        s.start();
        s.manual_press(); // Reverse
        s.manual_press(); // PingPong
        // Ride up to the top so the direction flips down.
        for _ in 0..3 {
            s.tick(inputs(4, 0));
        }
        assert!(!s.state().pingpong_direction);

        // Cycle all the way round back into PingPong.
        for _ in 0..4 {
            s.manual_press();
        }
        assert_eq!(s.state().traversal_mode, TraversalMode::PingPong);
        assert!(s.state().pingpong_direction);
    }

    #[test]
    fn initial_mode_comes_from_config() {
        let config = SequencerConfig {
            initial_mode: TraversalMode::Reverse,
            ..SequencerConfig::default()
        };
        let mut s = Sequencer::new(&config, Wyrand::seed(1));
        s.start();
        assert_eq!(s.tick(inputs(4, 0)), Some(OutputCommand::Show(3)));
    }
}
