//! Debounced press-edge detection for the mode button.
//!
//! The sequencer's manual handler must fire once per physical press. The
//! control loop samples the raw pin level on every pass and feeds it to
//! [`DebouncedButton::update()`], which reports the released→pressed edge
//! after the level has been stable for the debounce interval.

/// Time-based debouncer with press-edge output.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedButton {
    debounce_ms: u64,
    /// Accepted (debounced) level.
    stable: bool,
    /// Most recently sampled raw level.
    candidate: bool,
    /// Time the raw level last changed.
    changed_at: u64,
}

impl DebouncedButton {
    /// Released button with the given debounce interval.
    pub const fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            stable: false,
            candidate: false,
            changed_at: 0,
        }
    }

    /// Returns the debounced level.
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Sample the raw level at `now_ms`.
    ///
    /// Returns `true` exactly once per press: on the sample where a pressed
    /// level has been stable for `debounce_ms`. Holding the button, releasing
    /// it, and bounces shorter than the interval all return `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepseq::button::DebouncedButton;
    ///
    /// let mut b = DebouncedButton::new(5);
    /// assert!(!b.update(true, 0));
    /// assert!(b.update(true, 5));
    /// assert!(!b.update(true, 100)); // held
    /// ```
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> bool {
        if pressed != self.candidate {
            self.candidate = pressed;
            self.changed_at = now_ms;
        }

        if self.candidate != self.stable
            && now_ms.saturating_sub(self.changed_at) >= self.debounce_ms
        {
            self.stable = self.candidate;
            return self.stable;
        }

        false
    }
}
