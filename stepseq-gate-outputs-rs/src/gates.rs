//! Step gate outputs.
//!
//! [`GateOutputs`] drives one GPIO per step plus the shared pulse indicator.
//! Exactly one step pin is high while a step is shown; every other step pin
//! is driven low *before* the new one goes high so two gates never overlap.

use embedded_hal::digital::{OutputPin, PinState};
use stepseq::sequencer::StepOutputs;

use crate::error::GateError;

/// GPIO-backed implementation of [`StepOutputs`].
///
/// # Type parameters
/// * `P` — step output pin type
/// * `L` — indicator pin type (must share `P`'s error type)
/// * `N` — number of step outputs
pub struct GateOutputs<P, L, const N: usize> {
    steps: [P; N],
    indicator: L,
    /// Step currently driven high, if any.
    active: Option<usize>,
}

impl<P, L, const N: usize> GateOutputs<P, L, N>
where
    P: OutputPin,
    L: OutputPin<Error = P::Error>,
{
    /// Take ownership of the pins.
    ///
    /// No pin is written. Call [`init()`](Self::init) before the first
    /// step is shown so every output starts low.
    pub fn new(steps: [P; N], indicator: L) -> Self {
        Self {
            steps,
            indicator,
            active: None,
        }
    }

    /// Drive every step output and the indicator low.
    ///
    /// # Errors
    /// Returns the first [`GateError::Pin`] encountered.
    pub fn init(&mut self) -> Result<(), GateError<P::Error>> {
        self.clear_all()?;
        self.indicator.set_low()?;
        Ok(())
    }

    /// Step currently driven high, if any.
    pub fn active_step(&self) -> Option<usize> {
        self.active
    }

    /// Give the pins back.
    pub fn release(self) -> ([P; N], L) {
        (self.steps, self.indicator)
    }

    fn clear_all(&mut self) -> Result<(), GateError<P::Error>> {
        for pin in self.steps.iter_mut() {
            pin.set_low()?;
        }
        self.active = None;
        Ok(())
    }
}

impl<P, L, const N: usize> StepOutputs for GateOutputs<P, L, N>
where
    P: OutputPin,
    L: OutputPin<Error = P::Error>,
{
    type Error = GateError<P::Error>;

    /// # Errors
    /// * [`GateError::InvalidStep`] if `step >= N`; no pin is touched.
    /// * [`GateError::Pin`] on a GPIO failure.
    fn show_step(&mut self, step: usize) -> Result<(), Self::Error> {
        if step >= N {
            return Err(GateError::InvalidStep);
        }

        for (i, pin) in self.steps.iter_mut().enumerate() {
            if i != step {
                pin.set_low()?;
            }
        }
        self.steps[step].set_high()?;
        self.active = Some(step);
        Ok(())
    }

    fn clear_steps(&mut self) -> Result<(), Self::Error> {
        self.clear_all()
    }

    fn set_indicator(&mut self, on: bool) -> Result<(), Self::Error> {
        self.indicator.set_state(PinState::from(on))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{Error, ErrorKind, ErrorType};

    #[derive(Debug, Default)]
    struct MockPin {
        high: bool,
        writes: usize,
        fail: bool,
    }

    #[derive(Debug, PartialEq, Eq)]
    struct PinFault;

    impl Error for PinFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    impl ErrorType for MockPin {
        type Error = PinFault;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), PinFault> {
            if self.fail {
                return Err(PinFault);
            }
            self.high = false;
            self.writes += 1;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), PinFault> {
            if self.fail {
                return Err(PinFault);
            }
            self.high = true;
            self.writes += 1;
            Ok(())
        }
    }

    fn gates() -> GateOutputs<MockPin, MockPin, 8> {
        GateOutputs::new(core::array::from_fn(|_| MockPin::default()), MockPin::default())
    }

    fn levels(g: &GateOutputs<MockPin, MockPin, 8>) -> [bool; 8] {
        core::array::from_fn(|i| g.steps[i].high)
    }

    #[test]
    fn new_writes_nothing() {
        let g = gates();
        assert!(g.steps.iter().all(|p| p.writes == 0));
        assert_eq!(g.indicator.writes, 0);
        assert_eq!(g.active_step(), None);
    }

    #[test]
    fn init_drives_everything_low() {
        let mut g = gates();
        g.init().unwrap();
        assert!(g.steps.iter().all(|p| p.writes == 1 && !p.high));
        assert_eq!(g.indicator.writes, 1);
        assert!(!g.indicator.high);
    }

    #[test]
    fn show_step_leaves_exactly_one_gate_high() {
        let mut g = gates();
        g.show_step(3).unwrap();
        assert_eq!(levels(&g), [false, false, false, true, false, false, false, false]);

        g.show_step(7).unwrap();
        assert_eq!(levels(&g), [false, false, false, false, false, false, false, true]);
        assert_eq!(g.active_step(), Some(7));
    }

    #[test]
    fn show_step_out_of_range_touches_nothing() {
        let mut g = gates();
        assert_eq!(g.show_step(8), Err(GateError::InvalidStep));
        assert!(g.steps.iter().all(|p| p.writes == 0));
    }

    #[test]
    fn clear_steps_drops_every_gate() {
        let mut g = gates();
        g.show_step(2).unwrap();
        g.clear_steps().unwrap();
        assert_eq!(levels(&g), [false; 8]);
        assert_eq!(g.active_step(), None);
    }

    #[test]
    fn indicator_follows_requested_state() {
        let mut g = gates();
        g.set_indicator(true).unwrap();
        assert!(g.indicator.high);
        g.set_indicator(false).unwrap();
        assert!(!g.indicator.high);
    }

    #[test]
    fn pin_errors_propagate() {
        let mut g = gates();
        g.steps[0].fail = true;
        assert_eq!(g.show_step(4), Err(GateError::Pin(PinFault)));
        assert_eq!(g.active_step(), None);
    }

    #[test]
    fn controller_drives_gates_from_transport() {
        use stepseq::analog::ControlInputs;
        use stepseq::midi::TransportEvent;
        use stepseq::sequencer::{Controller, SequencerConfig};
        use tinyrand::{Seeded, Wyrand};

        let inputs = ControlInputs {
            step_count: 3,
            division_index: 0,
        };
        let mut c = Controller::new(&SequencerConfig::default(), gates(), Wyrand::seed(1));

        c.on_transport(TransportEvent::Start, inputs, 0).unwrap();
        assert_eq!(c.outputs().active_step(), Some(0));
        assert!(c.outputs().indicator.high);

        c.service(20).unwrap();
        assert!(!c.outputs().indicator.high);

        for expected in [1, 2, 0] {
            c.on_transport(TransportEvent::Tick, inputs, 100).unwrap();
            assert_eq!(c.outputs().active_step(), Some(expected));
        }

        c.on_transport(TransportEvent::Stop, inputs, 200).unwrap();
        assert_eq!(levels(c.outputs()), [false; 8]);
        assert!(!c.outputs().indicator.high);
    }

    #[test]
    fn release_returns_pins() {
        let mut g = gates();
        g.show_step(1).unwrap();
        let (steps, indicator) = g.release();
        assert!(steps[1].high);
        assert!(!indicator.high);
    }
}
